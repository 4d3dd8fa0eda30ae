//! Renderer projection of a form schema.
//!
//! [`RendererField`] has no slot for `rule`, `visible`, or `builder`, so a
//! [`RendererSchema`] cannot carry authoring-only metadata no matter how it
//! was built. [`project`] is the single path from a full schema to the
//! presentation layer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{
    DisplayConfig, EnumOption, FieldDefinition, FieldType, FormSchema, LayoutType, Prefill,
    ValueConstraints,
};

/// Keys that must never appear in a serialized renderer schema.
pub const PROTECTED_KEYS: [&str; 3] = ["rule", "visible", "builder"];

/// A field as seen by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RendererField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub display: DisplayConfig,
    pub layout: LayoutType,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<EnumOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_constraints: Option<ValueConstraints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefill: Option<Prefill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<serde_json::Map<String, serde_json::Value>>,
}

impl From<&FieldDefinition> for RendererField {
    fn from(field: &FieldDefinition) -> Self {
        RendererField {
            name: field.name.clone(),
            field_type: field.field_type,
            display: field.display.clone(),
            layout: field.layout,
            options: field.options.clone(),
            value_constraints: field.value_constraints.clone(),
            prefill: field.prefill.as_ref().map(|p| Prefill {
                value: p.value.as_ref().map(scrubbed),
            }),
            props: field.props.as_ref().map(scrubbed_map),
        }
    }
}

/// Deep copy of a JSON value with every protected key removed.
fn scrubbed(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => serde_json::Value::Object(scrubbed_map(map)),
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(scrubbed).collect())
        }
        other => other.clone(),
    }
}

fn scrubbed_map(
    map: &serde_json::Map<String, serde_json::Value>,
) -> serde_json::Map<String, serde_json::Value> {
    map.iter()
        .filter(|(key, _)| !PROTECTED_KEYS.contains(&key.as_str()))
        .map(|(key, inner)| (key.clone(), scrubbed(inner)))
        .collect()
}

/// The minimal schema handed to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RendererSchema {
    pub name: String,
    pub label: String,
    pub items: IndexMap<String, RendererField>,
}

impl RendererSchema {
    pub fn get(&self, name: &str) -> Option<&RendererField> {
        self.items.get(name)
    }

    /// Field names in render order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }
}

/// Project a full schema into a renderer schema.
///
/// The result is an independent deep copy: later edits to `schema` do not
/// show through, and vice versa. A field named after a protected key is left
/// out, since its name would itself become a protected key;
/// [`crate::document::check_shape`] rejects such schemas, but one built by
/// hand can still hold them.
pub fn project(schema: &FormSchema) -> RendererSchema {
    let items = schema
        .items
        .iter()
        .filter(|(key, _)| {
            let reserved = PROTECTED_KEYS.contains(&key.as_str());
            if reserved {
                warn!(field = %key, "field named after a protected key left out of renderer schema");
            }
            !reserved
        })
        .map(|(key, field)| (key.clone(), RendererField::from(field)))
        .collect();

    RendererSchema {
        name: schema.name.clone(),
        label: schema.label.clone(),
        items,
    }
}

/// Return the first protected key found anywhere inside a JSON value.
///
/// Used to audit serialized renderer output.
pub fn find_protected_key(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Object(map) => {
            for (key, inner) in map {
                if PROTECTED_KEYS.contains(&key.as_str()) {
                    return Some(key.clone());
                }
                if let Some(found) = find_protected_key(inner) {
                    return Some(found);
                }
            }
            None
        }
        serde_json::Value::Array(items) => items.iter().find_map(find_protected_key),
        _ => None,
    }
}
