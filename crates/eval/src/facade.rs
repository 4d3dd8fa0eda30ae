//! Validation facade exposed to the presentation layer.
//!
//! Built from the full schema, its renderer projection, and a snapshot of
//! the current form values. The presentation layer gets visibility flags
//! and error messages out of it, never the schema or its rules.

use std::fmt;

use formwork_schema::{FormSchema, FormValues, RendererSchema};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::condition;
use crate::config::ValidationConfig;
use crate::context::ProtectedContext;
use crate::field;

/// Outcome of whole-form validation.
///
/// Serializes as `{"success": bool, "errors": {field: message}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    success: bool,
    errors: IndexMap<String, String>,
}

impl ValidationResult {
    pub fn from_errors(errors: IndexMap<String, String>) -> Self {
        ValidationResult {
            success: errors.is_empty(),
            errors,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Field name → message, in schema order.
    pub fn errors(&self) -> &IndexMap<String, String> {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }
}

/// Visibility and validation queries over one schema and value snapshot.
pub struct ValidationFacade<'a> {
    context: ProtectedContext<'a>,
    renderer: &'a RendererSchema,
    values: FormValues,
    config: ValidationConfig,
}

impl<'a> ValidationFacade<'a> {
    /// Build a facade with the default configuration.
    ///
    /// `values` is copied so that one evaluation pass always reads a single
    /// consistent snapshot.
    pub fn new(schema: &'a FormSchema, renderer: &'a RendererSchema, values: &FormValues) -> Self {
        ValidationFacade {
            context: ProtectedContext::new(schema),
            renderer,
            values: values.clone(),
            config: ValidationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the value snapshot, keeping the schema index.
    pub fn with_values(mut self, values: &FormValues) -> Self {
        self.values = values.clone();
        self
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    // ── Visibility ──────────────────────────────────────────────────

    /// Visibility of `name` against the facade's value snapshot.
    pub fn is_field_visible(&self, name: &str) -> bool {
        self.is_field_visible_with(name, &self.values)
    }

    /// Visibility of `name` against `values`.
    ///
    /// A field without a visibility condition is always visible. Otherwise
    /// every dependency must satisfy its expression; a dependency on a field
    /// with no value (or no definition) evaluates against an absent value.
    pub fn is_field_visible_with(&self, name: &str, values: &FormValues) -> bool {
        let Some(condition) = self.context.visibility_rule(name) else {
            return true;
        };
        condition
            .iter()
            .all(|(dependent, expression)| condition::evaluate(expression, values.get(dependent)))
    }

    /// Renderer field names visible against the facade's value snapshot.
    pub fn visible_field_names(&self) -> Vec<String> {
        self.visible_names(&self.values)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn visible_names<'s>(&'s self, values: &FormValues) -> Vec<&'s str> {
        self.renderer
            .field_names()
            .filter(|name| self.is_field_visible_with(name, values))
            .collect()
    }

    // ── Validation ──────────────────────────────────────────────────

    pub fn is_field_required(&self, name: &str) -> bool {
        self.context.is_required(name)
    }

    /// Validate one value for field `name`. Unknown fields are always valid.
    pub fn validate_field(&self, name: &str, value: Option<&Value>) -> Option<String> {
        let definition = self.context.field(name)?;
        field::validate_value(definition, value, &self.config)
    }

    /// Validate every field visible under `values`, in render order.
    ///
    /// Hidden fields are skipped entirely and never appear in the errors,
    /// whatever `values` holds for them.
    pub fn validate_visible_fields(&self, values: &FormValues) -> ValidationResult {
        let visible = self.visible_names(values);
        let mut errors = IndexMap::new();

        for name in &visible {
            if let Some(message) = self.validate_field(name, values.get(name)) {
                errors.insert((*name).to_string(), message);
            }
        }

        debug!(
            visible = visible.len(),
            hidden = self.renderer.items.len() - visible.len(),
            failed = errors.len(),
            "visible fields validated"
        );
        ValidationResult::from_errors(errors)
    }

    /// Validate the facade's own value snapshot.
    pub fn validate(&self) -> ValidationResult {
        self.validate_visible_fields(&self.values)
    }
}

impl fmt::Debug for ValidationFacade<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationFacade")
            .field("context", &self.context)
            .field("form", &self.renderer.name)
            .field("values", &self.values.0.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_schema::{project, FieldDefinition, FieldType};
    use serde_json::json;

    fn values(pairs: &[(&str, Value)]) -> FormValues {
        pairs.iter().map(|(k, v)| (*k, v.clone())).collect()
    }

    #[test]
    fn field_without_condition_is_visible() {
        let schema = FormSchema::sample();
        let renderer = project(&schema);
        let facade = ValidationFacade::new(&schema, &renderer, &FormValues::new());
        assert!(facade.is_field_visible("email"));
        assert!(facade.is_field_visible("ghost"));
    }

    #[test]
    fn dependent_field_follows_condition() {
        let schema = FormSchema::sample();
        let renderer = project(&schema);
        let facade = ValidationFacade::new(&schema, &renderer, &FormValues::new());

        assert!(!facade.is_field_visible("days"));
        assert!(!facade.is_field_visible_with("days", &values(&[("duration", json!("half"))])));
        assert!(facade.is_field_visible_with("days", &values(&[("duration", json!("full"))])));
    }

    #[test]
    fn all_dependencies_must_hold() {
        let mut schema = FormSchema::new("f", "F");
        schema.insert(FieldDefinition::new("a", FieldType::Text));
        schema.insert(FieldDefinition::new("b", FieldType::Text));
        let mut c = FieldDefinition::new("c", FieldType::Text);
        c.visible = Some(
            [("a", "is:x"), ("b", "not:y")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        schema.insert(c);
        let renderer = project(&schema);
        let facade = ValidationFacade::new(&schema, &renderer, &FormValues::new());

        assert!(facade.is_field_visible_with("c", &values(&[("a", json!("x"))])));
        assert!(!facade.is_field_visible_with("c", &values(&[("a", json!("x")), ("b", json!("y"))])));
        assert!(!facade.is_field_visible_with("c", &values(&[("b", json!("z"))])));
    }

    #[test]
    fn dependency_on_missing_field_hides_field() {
        let mut schema = FormSchema::new("f", "F");
        let mut field = FieldDefinition::new("a", FieldType::Text);
        field.visible = Some(
            std::iter::once(("ghost".to_string(), "required".to_string())).collect(),
        );
        schema.insert(field);
        let renderer = project(&schema);
        let facade = ValidationFacade::new(&schema, &renderer, &FormValues::new());
        assert!(!facade.is_field_visible("a"));
    }

    #[test]
    fn visible_field_names_follow_render_order() {
        let schema = FormSchema::sample();
        let renderer = project(&schema);
        let hidden = ValidationFacade::new(&schema, &renderer, &FormValues::new());
        assert_eq!(hidden.visible_field_names(), vec!["full_name", "email", "duration"]);

        let shown = hidden.with_values(&values(&[("duration", json!("full"))]));
        assert_eq!(
            shown.visible_field_names(),
            vec!["full_name", "email", "duration", "days"]
        );
    }

    #[test]
    fn validate_field_uses_full_definition() {
        let schema = FormSchema::sample();
        let renderer = project(&schema);
        let facade = ValidationFacade::new(&schema, &renderer, &FormValues::new());

        assert_eq!(
            facade.validate_field("full_name", None).as_deref(),
            Some("This field is required")
        );
        assert_eq!(facade.validate_field("email", Some(&json!("a@b.co"))), None);
        assert_eq!(facade.validate_field("ghost", Some(&json!("x"))), None);
        assert!(facade.is_field_required("email"));
        assert!(!facade.is_field_required("days"));
    }

    #[test]
    fn hidden_fields_are_not_validated() {
        let schema = FormSchema::sample();
        let renderer = project(&schema);
        let facade = ValidationFacade::new(&schema, &renderer, &FormValues::new());

        let input = values(&[
            ("full_name", json!("Ada")),
            ("email", json!("ada@example.com")),
            ("duration", json!("half")),
            ("days", json!(2.5)),
        ]);
        let result = facade.validate_visible_fields(&input);
        assert!(result.is_success());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn errors_are_reported_in_render_order() {
        let schema = FormSchema::sample();
        let renderer = project(&schema);
        let facade = ValidationFacade::new(&schema, &renderer, &FormValues::new());

        let input = values(&[
            ("email", json!("nope")),
            ("duration", json!("full")),
            ("days", json!(2.5)),
        ]);
        let result = facade.validate_visible_fields(&input);
        assert!(!result.is_success());
        assert_eq!(
            result.errors().keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["full_name", "email", "days"]
        );
        assert_eq!(result.error("days"), Some("Decimal values are not allowed"));
    }

    #[test]
    fn result_serializes_with_success_flag() {
        let schema = FormSchema::sample();
        let renderer = project(&schema);
        let facade = ValidationFacade::new(&schema, &renderer, &FormValues::new());
        let json = serde_json::to_value(facade.validate()).unwrap();
        assert_eq!(json["success"], json!(false));
        assert_eq!(json["errors"]["full_name"], json!("This field is required"));
        assert_eq!(json["errors"]["email"], json!("This field is required"));
    }

    #[test]
    fn strict_config_flows_into_field_checks() {
        let schema = FormSchema::sample();
        let renderer = project(&schema);
        let facade = ValidationFacade::new(&schema, &renderer, &FormValues::new())
            .with_config(ValidationConfig::strict());
        assert_eq!(
            facade.validate_field("duration", Some(&json!("quarter"))).as_deref(),
            Some("Please select a valid option")
        );
    }

    #[test]
    fn debug_output_hides_rules() {
        let schema = FormSchema::sample();
        let renderer = project(&schema);
        let facade = ValidationFacade::new(&schema, &renderer, &FormValues::new());
        let rendered = format!("{:?}", facade);
        assert!(!rendered.contains("is:full"));
        assert!(!rendered.contains("\"required\""));
    }
}
