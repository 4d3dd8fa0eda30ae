//! Single-field value validation.
//!
//! Checks run in a fixed order and the first failure wins:
//! 1. required (dominates everything below)
//! 2. type checks: Number parse, integrality, minimum, maximum; Email format
//! 3. length (`props.maxlength`) for Text and Email
//! 4. option membership and date format, when enabled in the config
//!
//! Type checks only run when a value is present; an optional field left
//! empty is valid.

use std::sync::LazyLock;

use formwork_schema::{FieldDefinition, FieldType};
use regex::Regex;
use serde_json::Value;
use time::macros::format_description;

use crate::condition::{comparison_string, is_empty_value, requires_value};
use crate::config::ValidationConfig;
use crate::numeric::{coerce_number, from_json_number};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Whether the field's rule carries the `required` clause.
pub fn is_required(field: &FieldDefinition) -> bool {
    field.rule.as_deref().is_some_and(requires_value)
}

/// Validate `value` against `field`, returning the first error message.
pub fn validate_value(
    field: &FieldDefinition,
    value: Option<&Value>,
    config: &ValidationConfig,
) -> Option<String> {
    let messages = &config.messages;

    if is_empty_value(value) {
        return is_required(field).then(|| messages.required.clone());
    }
    let value = value?;

    match field.field_type {
        FieldType::Number => check_number(field, value, config),
        FieldType::Email => check_email(value, config).or_else(|| check_length(field, value, config)),
        FieldType::Text => check_length(field, value, config),
        FieldType::Radio | FieldType::Select if config.enforce_options => {
            check_option(field, value, config)
        }
        FieldType::Checkbox if config.enforce_options => check_options(field, value, config),
        FieldType::Date if config.enforce_date_format => check_date(value, config),
        _ => None,
    }
}

fn check_number(field: &FieldDefinition, value: &Value, config: &ValidationConfig) -> Option<String> {
    let messages = &config.messages;
    let Some(number) = coerce_number(value) else {
        return Some(messages.invalid_number.clone());
    };
    let Some(ref constraints) = field.value_constraints else {
        return None;
    };

    if constraints.forbids_decimals() && !number.is_integral() {
        return Some(messages.decimal_not_allowed.clone());
    }
    if let Some(ref min) = constraints.minimum {
        if from_json_number(min).is_some_and(|bound| number < bound) {
            return Some(messages.min_violation(min));
        }
    }
    if let Some(ref max) = constraints.maximum {
        if from_json_number(max).is_some_and(|bound| number > bound) {
            return Some(messages.max_violation(max));
        }
    }
    None
}

fn check_email(value: &Value, config: &ValidationConfig) -> Option<String> {
    match value.as_str() {
        Some(s) if EMAIL_RE.is_match(s) => None,
        _ => Some(config.messages.invalid_email.clone()),
    }
}

fn check_length(field: &FieldDefinition, value: &Value, config: &ValidationConfig) -> Option<String> {
    if !config.enforce_max_length {
        return None;
    }
    let max = field.max_length()?;
    let s = value.as_str()?;
    if s.chars().count() as u64 > max {
        return Some(config.messages.length_violation(max));
    }
    None
}

/// True if `value` matches one of the field's option values.
/// Fields without options accept any scalar.
fn matches_option(field: &FieldDefinition, value: &Value) -> bool {
    let Some(candidate) = comparison_string(Some(value)) else {
        return false;
    };
    match field.options {
        Some(ref options) if !options.is_empty() => options
            .iter()
            .any(|opt| opt.value.comparison_string() == candidate),
        _ => true,
    }
}

fn check_option(field: &FieldDefinition, value: &Value, config: &ValidationConfig) -> Option<String> {
    (!matches_option(field, value)).then(|| config.messages.invalid_option.clone())
}

fn check_options(field: &FieldDefinition, value: &Value, config: &ValidationConfig) -> Option<String> {
    let valid = match value.as_array() {
        Some(items) => items.iter().all(|item| matches_option(field, item)),
        None => false,
    };
    (!valid).then(|| config.messages.invalid_options.clone())
}

fn check_date(value: &Value, config: &ValidationConfig) -> Option<String> {
    let format = format_description!("[year]-[month]-[day]");
    match value.as_str() {
        Some(s) if time::Date::parse(s, format).is_ok() => None,
        _ => Some(config.messages.invalid_date.clone()),
    }
}
