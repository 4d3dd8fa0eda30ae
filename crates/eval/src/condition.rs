//! Condition expression evaluator.
//!
//! An expression is one or more clauses joined by `|`; all clauses must
//! hold. Clauses are evaluated left to right and evaluation stops at the
//! first one that fails.
//!
//! | Clause      | Holds when                                         |
//! |-------------|----------------------------------------------------|
//! | `required`  | the value is present, not `null`, and not `""`     |
//! | `is:<lit>`  | the value's comparison string equals `<lit>`       |
//! | `not:<lit>` | the value's comparison string differs from `<lit>` |
//! | anything else | always (reserved for future clauses)             |
//!
//! Values are compared as strings: JSON strings as themselves, numbers in
//! their JSON rendering (`3`, `2.5`), booleans as `true` / `false`. Absent
//! values, `null`, arrays, and objects have no comparison string, so they
//! never satisfy `is:` and always satisfy `not:`.

use serde_json::Value;

/// One `|`-delimited unit of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause<'a> {
    Required,
    Is(&'a str),
    Not(&'a str),
    Unknown(&'a str),
}

impl<'a> Clause<'a> {
    pub fn parse(token: &'a str) -> Self {
        if token == "required" {
            Clause::Required
        } else if let Some(lit) = token.strip_prefix("is:") {
            Clause::Is(lit)
        } else if let Some(lit) = token.strip_prefix("not:") {
            Clause::Not(lit)
        } else {
            Clause::Unknown(token)
        }
    }

    /// Whether this clause holds for `value`.
    pub fn holds(&self, value: Option<&Value>) -> bool {
        match self {
            Clause::Required => !is_empty_value(value),
            Clause::Is(lit) => comparison_string(value).is_some_and(|s| s == *lit),
            Clause::Not(lit) => comparison_string(value).is_none_or(|s| s != *lit),
            Clause::Unknown(_) => true,
        }
    }
}

/// Split an expression into its clauses, in written order.
pub fn parse_expression(expression: &str) -> impl Iterator<Item = Clause<'_>> {
    expression.split('|').map(Clause::parse)
}

/// Evaluate `expression` against `value`.
pub fn evaluate(expression: &str, value: Option<&Value>) -> bool {
    parse_expression(expression).all(|clause| clause.holds(value))
}

/// Whether a rule string contains the `required` clause.
pub fn requires_value(rule: &str) -> bool {
    parse_expression(rule).any(|clause| clause == Clause::Required)
}

/// Absent, `null`, and the empty string all count as "no value".
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// The string a value is compared as in `is:` / `not:` clauses.
pub fn comparison_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
