//! Authoring session: the single owner of the mutable form schema.
//!
//! The session holds the schema being edited and the values typed into its
//! live preview. Derived views (the renderer projection, validation
//! contexts) are rebuilt from [`SchemaSession::schema`] after every edit,
//! never patched.

use tracing::{debug, warn};

use crate::document;
use crate::error::SchemaError;
use crate::renderer::{self, RendererSchema};
use crate::types::{
    BuilderHint, BuilderType, DisplayConfig, EnumOption, FieldDefinition, FieldType, FormSchema,
    FormValues, ValueConstraints,
};

/// Editor state for one form.
#[derive(Debug, Clone)]
pub struct SchemaSession {
    schema: FormSchema,
    values: FormValues,
    /// Incremented on every schema change; lets callers drop stale derived views.
    revision: u64,
    next_field_id: u64,
}

impl Default for SchemaSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaSession {
    /// A session opened on the sample leave-request form.
    pub fn new() -> Self {
        Self::with_schema(FormSchema::sample())
    }

    pub fn with_schema(schema: FormSchema) -> Self {
        SchemaSession {
            schema,
            values: FormValues::new(),
            revision: 0,
            next_field_id: 1,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Project the current schema for the presentation layer.
    pub fn renderer_schema(&self) -> RendererSchema {
        renderer::project(&self.schema)
    }

    // ── Field editing ───────────────────────────────────────────────

    /// Append a new field of the given type and return its generated name.
    ///
    /// Choice fields start with two placeholder options; Number fields start
    /// with decimals disallowed.
    pub fn add_field(&mut self, field_type: FieldType) -> String {
        let name = self.fresh_field_name();
        let mut field = FieldDefinition::new(name.clone(), field_type);
        field.display = DisplayConfig::labeled(format!("New {} Field", field_type.as_str()));
        field.builder = Some(BuilderHint {
            builder_type: BuilderType::for_field_type(field_type),
        });
        if field_type.is_choice() {
            field.options = Some(vec![
                EnumOption::new("Option 1", "option1"),
                EnumOption::new("Option 2", "option2"),
            ]);
        }
        if field_type == FieldType::Number {
            field.value_constraints = Some(ValueConstraints {
                allow_decimal: Some(0),
                ..Default::default()
            });
        }

        self.schema.insert(field);
        self.touch();
        debug!(field = %name, field_type = field_type.as_str(), "field added");
        name
    }

    /// Remove a field and any value entered for it.
    pub fn remove_field(&mut self, name: &str) -> Result<FieldDefinition, SchemaError> {
        let removed = self
            .schema
            .items
            .shift_remove(name)
            .ok_or_else(|| SchemaError::UnknownField(name.to_string()))?;
        self.values.remove(name);
        self.touch();
        debug!(field = %name, "field removed");
        Ok(removed)
    }

    /// Edit a field in place.
    ///
    /// The edit is applied to a copy and committed only if it keeps the
    /// field's name and the schema's shape invariants intact.
    pub fn update_field<F>(&mut self, name: &str, edit: F) -> Result<(), SchemaError>
    where
        F: FnOnce(&mut FieldDefinition),
    {
        let current = self
            .schema
            .get(name)
            .ok_or_else(|| SchemaError::UnknownField(name.to_string()))?;
        let mut updated = current.clone();
        edit(&mut updated);

        if updated.name != name {
            return Err(SchemaError::RenamedField {
                from: name.to_string(),
                to: updated.name,
            });
        }

        let mut candidate = self.schema.clone();
        candidate.insert(updated);
        document::check_shape(&candidate)?;

        self.schema = candidate;
        self.touch();
        debug!(field = %name, "field updated");
        Ok(())
    }

    /// Reorder fields to follow `order`.
    ///
    /// Unknown names are ignored; fields missing from `order` keep their
    /// relative order after the listed ones.
    pub fn reorder_fields<S: AsRef<str>>(&mut self, order: &[S]) {
        let mut items = std::mem::take(&mut self.schema.items);
        let mut reordered = indexmap::IndexMap::with_capacity(items.len());
        for name in order {
            if let Some((key, field)) = items.shift_remove_entry(name.as_ref()) {
                reordered.insert(key, field);
            }
        }
        reordered.extend(items);
        self.schema.items = reordered;
        self.touch();
    }

    // ── Preview values ──────────────────────────────────────────────

    pub fn set_value(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.values.insert(name, value);
    }

    pub fn clear_values(&mut self) {
        self.values.clear();
    }

    // ── Import / export ─────────────────────────────────────────────

    /// Export the schema as a pretty-printed JSON document.
    pub fn export_schema(&self) -> Result<String, SchemaError> {
        document::to_json(&self.schema)
    }

    /// Replace the schema with one parsed from `text`.
    ///
    /// On failure the current schema and values are left untouched. On
    /// success preview values are cleared since they belonged to the old form.
    pub fn import_schema(&mut self, text: &str) -> Result<(), SchemaError> {
        match document::from_json(text) {
            Ok(schema) => {
                debug!(form = %schema.name, fields = schema.items.len(), "schema imported");
                self.schema = schema;
                self.values.clear();
                self.touch();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "schema import rejected, keeping current schema");
                Err(e)
            }
        }
    }

    /// Restore the sample form and clear preview values.
    pub fn reset(&mut self) {
        self.schema = FormSchema::sample();
        self.values.clear();
        self.touch();
    }

    fn fresh_field_name(&mut self) -> String {
        loop {
            let candidate = format!("field_{}", self.next_field_id);
            self.next_field_id += 1;
            if !self.schema.items.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
