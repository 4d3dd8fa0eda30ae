//! JSON export and import of form schemas.
//!
//! [`to_json`] writes the schema as a pretty-printed document; [`from_json`]
//! parses it back and checks the structural invariants serde alone cannot
//! express. `from_json(&to_json(s)?)? == s` holds for every schema that
//! passes [`check_shape`].

use std::collections::HashSet;

use crate::error::SchemaError;
use crate::renderer::PROTECTED_KEYS;
use crate::types::FormSchema;

/// Serialize a schema to a pretty-printed JSON document.
pub fn to_json(schema: &FormSchema) -> Result<String, SchemaError> {
    Ok(serde_json::to_string_pretty(schema)?)
}

/// Serialize a schema to a `serde_json::Value`.
pub fn to_value(schema: &FormSchema) -> Result<serde_json::Value, SchemaError> {
    Ok(serde_json::to_value(schema)?)
}

/// Parse a JSON document into a schema and check its shape.
pub fn from_json(document: &str) -> Result<FormSchema, SchemaError> {
    let schema: FormSchema = serde_json::from_str(document)?;
    check_shape(&schema)?;
    Ok(schema)
}

/// Parse an already-decoded JSON value into a schema and check its shape.
pub fn from_value(value: serde_json::Value) -> Result<FormSchema, SchemaError> {
    let schema: FormSchema = serde_json::from_value(value)?;
    check_shape(&schema)?;
    Ok(schema)
}

/// Check invariants that hold for every well-formed schema:
/// - each item key equals the field's `name`
/// - no field is named `rule`, `visible`, or `builder`
/// - option values are unique within a field
/// - `allow_decimal` is `0` or `1`
/// - a prefill value, when given, is a string, number, or boolean
///
/// Visibility conditions that reference missing fields are allowed; they
/// evaluate as a non-match.
pub fn check_shape(schema: &FormSchema) -> Result<(), SchemaError> {
    for (key, field) in &schema.items {
        if key != &field.name {
            return Err(SchemaError::KeyMismatch {
                key: key.clone(),
                name: field.name.clone(),
            });
        }
        if PROTECTED_KEYS.contains(&key.as_str()) {
            return Err(SchemaError::ReservedFieldName(key.clone()));
        }

        if let Some(ref options) = field.options {
            let mut seen = HashSet::with_capacity(options.len());
            for opt in options {
                let value = opt.value.comparison_string();
                if !seen.insert(value.clone()) {
                    return Err(SchemaError::DuplicateOption {
                        field: field.name.clone(),
                        value,
                    });
                }
            }
        }

        if let Some(allow) = field
            .value_constraints
            .as_ref()
            .and_then(|c| c.allow_decimal)
        {
            if allow > 1 {
                return Err(SchemaError::InvalidAllowDecimal {
                    field: field.name.clone(),
                    value: allow,
                });
            }
        }

        if let Some(value) = field.prefill.as_ref().and_then(|p| p.value.as_ref()) {
            if !(value.is_string() || value.is_number() || value.is_boolean()) {
                return Err(SchemaError::InvalidPrefill {
                    field: field.name.clone(),
                });
            }
        }
    }
    Ok(())
}
