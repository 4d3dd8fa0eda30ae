//! Protected validation context.
//!
//! Indexes the visibility conditions and validation rules of a full schema
//! by field name. The context answers point queries but never hands the
//! schema itself back to callers outside this crate, and its `Debug` output
//! reports counts only.

use std::collections::HashMap;
use std::fmt;

use formwork_schema::{FieldDefinition, FormSchema, VisibilityCondition};
use tracing::debug;

use crate::condition::requires_value;

/// Rule index over one schema snapshot. Rebuild it when the schema changes.
pub struct ProtectedContext<'a> {
    schema: &'a FormSchema,
    visibility: HashMap<&'a str, &'a VisibilityCondition>,
    rules: HashMap<&'a str, &'a str>,
}

impl<'a> ProtectedContext<'a> {
    pub fn new(schema: &'a FormSchema) -> Self {
        let mut visibility = HashMap::new();
        let mut rules = HashMap::new();

        for (name, field) in &schema.items {
            if let Some(ref condition) = field.visible {
                visibility.insert(name.as_str(), condition);
            }
            if let Some(ref rule) = field.rule {
                rules.insert(name.as_str(), rule.as_str());
            }
        }

        debug!(
            fields = schema.items.len(),
            visibility_rules = visibility.len(),
            validation_rules = rules.len(),
            "protected validation context built"
        );

        ProtectedContext {
            schema,
            visibility,
            rules,
        }
    }

    /// The visibility condition declared on `name`, if any.
    pub fn visibility_rule(&self, name: &str) -> Option<&'a VisibilityCondition> {
        self.visibility.get(name).copied()
    }

    /// The raw validation rule declared on `name`, if any.
    pub fn validation_rule(&self, name: &str) -> Option<&'a str> {
        self.rules.get(name).copied()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.schema.items.contains_key(name)
    }

    /// Whether `name` carries the `required` clause.
    pub fn is_required(&self, name: &str) -> bool {
        self.validation_rule(name).is_some_and(requires_value)
    }

    /// Full field definition. Reserved for the validation facade.
    pub(crate) fn field(&self, name: &str) -> Option<&'a FieldDefinition> {
        self.schema.items.get(name)
    }
}

impl fmt::Debug for ProtectedContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtectedContext")
            .field("fields", &self.schema.items.len())
            .field("visibility_rules", &self.visibility.len())
            .field("validation_rules", &self.rules.len())
            .finish()
    }
}
