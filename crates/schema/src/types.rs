//! Typed structs representing a Formwork form schema.
//!
//! The full schema carries both presentation metadata and authoring-only
//! metadata (`rule`, `visible`, `builder`). Only the renderer projection in
//! [`crate::renderer`] may cross into the presentation layer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ── Enumerations ────────────────────────────────────────────────────

/// The input type of a field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Number,
    Radio,
    Checkbox,
    Select,
    Date,
    Email,
}

impl FieldType {
    /// All field types, in palette order.
    pub const ALL: [FieldType; 7] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::Select,
        FieldType::Date,
        FieldType::Email,
    ];

    /// Choice fields present a fixed list of options.
    pub fn is_choice(self) -> bool {
        matches!(self, FieldType::Radio | FieldType::Checkbox | FieldType::Select)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::Number => "Number",
            FieldType::Radio => "Radio",
            FieldType::Checkbox => "Checkbox",
            FieldType::Select => "Select",
            FieldType::Date => "Date",
            FieldType::Email => "Email",
        }
    }
}

/// How a field is laid out by the renderer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum LayoutType {
    #[default]
    Normal,
    Inline,
    Full,
}

/// Builder widget used to author a field. Authoring-only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BuilderType {
    SimpleInput,
    SimpleChoice,
    DatePicker,
}

impl BuilderType {
    /// The builder widget the editor assigns to a freshly added field.
    pub fn for_field_type(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Date => BuilderType::DatePicker,
            t if t.is_choice() => BuilderType::SimpleChoice,
            _ => BuilderType::SimpleInput,
        }
    }
}

/// Builder hint wrapper, serialized as `{"type": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuilderHint {
    #[serde(rename = "type")]
    pub builder_type: BuilderType,
}

// ── Field attributes ────────────────────────────────────────────────

/// Label, placeholder, and description shown next to an input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DisplayConfig {
    pub fn labeled(label: impl Into<String>) -> Self {
        DisplayConfig {
            label: Some(label.into()),
            ..Default::default()
        }
    }
}

/// Numeric bounds for Number fields.
///
/// Bounds are kept as `serde_json::Number` so that exported documents
/// reproduce exactly what the author typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ValueConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<serde_json::Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<serde_json::Number>,
    /// `0` forbids fractional input, `1` allows it. Absent means allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_decimal: Option<u8>,
}

impl ValueConstraints {
    /// True only when decimals are explicitly disallowed (`allow_decimal: 0`).
    pub fn forbids_decimals(&self) -> bool {
        self.allow_decimal == Some(0)
    }
}

/// Value of a choice option: either a string or a number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OptionValue {
    Text(String),
    Number(serde_json::Number),
}

impl OptionValue {
    /// String form used for equality between option values and form input.
    pub fn comparison_string(&self) -> String {
        match self {
            OptionValue::Text(s) => s.clone(),
            OptionValue::Number(n) => n.to_string(),
        }
    }
}

/// One `{label, value}` entry of a choice field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnumOption {
    pub label: String,
    pub value: OptionValue,
}

impl EnumOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        EnumOption {
            label: label.into(),
            value: OptionValue::Text(value.into()),
        }
    }
}

/// Default value offered before the user types anything.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Prefill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

/// Mapping from a dependent field name to a condition expression,
/// e.g. `{"duration": "required|is:full"}`.
pub type VisibilityCondition = IndexMap<String, String>;

// ── Field and schema ────────────────────────────────────────────────

/// A complete field definition as authored in the builder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub layout: LayoutType,
    /// Validation rule, e.g. `"required"`. Authoring-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    /// Visibility condition. Authoring-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<VisibilityCondition>,
    /// Builder widget hint. Authoring-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builder: Option<BuilderHint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_constraints: Option<ValueConstraints>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<EnumOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefill: Option<Prefill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<serde_json::Map<String, serde_json::Value>>,
}

impl FieldDefinition {
    /// A bare field with only the required attributes set.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        FieldDefinition {
            name: name.into(),
            field_type,
            display: DisplayConfig::default(),
            layout: LayoutType::Normal,
            rule: None,
            visible: None,
            builder: None,
            value_constraints: None,
            options: None,
            prefill: None,
            props: None,
        }
    }

    /// Read `props.maxlength` when it is a non-negative integer.
    pub fn max_length(&self) -> Option<u64> {
        self.props
            .as_ref()
            .and_then(|p| p.get("maxlength"))
            .and_then(|v| v.as_u64())
    }
}

/// A form: a named, ordered collection of fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormSchema {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub items: IndexMap<String, FieldDefinition>,
}

impl FormSchema {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        FormSchema {
            name: name.into(),
            label: label.into(),
            items: IndexMap::new(),
        }
    }

    /// Insert a field keyed by its own name, replacing any field of that name.
    pub fn insert(&mut self, field: FieldDefinition) {
        self.items.insert(field.name.clone(), field);
    }

    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.items.get(name)
    }

    /// Field names in item order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// The leave-request form the editor opens with.
    pub fn sample() -> Self {
        let mut schema = FormSchema::new("step", "Sample Form");

        let mut full_name = FieldDefinition::new("full_name", FieldType::Text);
        full_name.display = DisplayConfig::labeled("Full Name");
        full_name.rule = Some("required".to_string());
        full_name.props = Some(serde_json::Map::from_iter([(
            "maxlength".to_string(),
            serde_json::Value::from(280),
        )]));
        full_name.builder = Some(BuilderHint {
            builder_type: BuilderType::SimpleInput,
        });
        schema.insert(full_name);

        let mut email = FieldDefinition::new("email", FieldType::Email);
        email.display = DisplayConfig {
            label: Some("Email Address".to_string()),
            placeholder: Some("your@email.com".to_string()),
            description: None,
        };
        email.rule = Some("required".to_string());
        email.builder = Some(BuilderHint {
            builder_type: BuilderType::SimpleInput,
        });
        schema.insert(email);

        let mut duration = FieldDefinition::new("duration", FieldType::Radio);
        duration.display = DisplayConfig {
            label: Some("Reason for Leave".to_string()),
            placeholder: Some(
                "If taking a full-day leave, please fill in the dates below.".to_string(),
            ),
            description: None,
        };
        duration.options = Some(vec![
            EnumOption::new("Half Day", "half"),
            EnumOption::new("Full Day", "full"),
        ]);
        duration.builder = Some(BuilderHint {
            builder_type: BuilderType::SimpleChoice,
        });
        schema.insert(duration);

        let mut days = FieldDefinition::new("days", FieldType::Number);
        days.display = DisplayConfig::labeled("Number of Leave Days");
        days.prefill = Some(Prefill {
            value: Some(serde_json::Value::from(1)),
        });
        days.value_constraints = Some(ValueConstraints {
            minimum: None,
            maximum: Some(serde_json::Number::from(1_000_000)),
            allow_decimal: Some(0),
        });
        days.visible = Some(VisibilityCondition::from_iter([(
            "duration".to_string(),
            "required|is:full".to_string(),
        )]));
        days.builder = Some(BuilderHint {
            builder_type: BuilderType::SimpleInput,
        });
        schema.insert(days);

        schema
    }
}

/// Values entered by the end user, keyed by field name.
///
/// Absent keys and JSON `null` both mean "no value".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct FormValues(pub IndexMap<String, serde_json::Value>);

impl FormValues {
    pub fn new() -> Self {
        FormValues(IndexMap::new())
    }

    /// The value for `name`, treating JSON `null` as absent.
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.0.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<serde_json::Value> {
        self.0.shift_remove(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<K: Into<String>> FromIterator<(K, serde_json::Value)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, serde_json::Value)>>(iter: I) -> Self {
        FormValues(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
