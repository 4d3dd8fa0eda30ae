//! Numeric coercion using `rust_decimal`.
//!
//! Form input arrives as JSON numbers or as strings typed into a text box.
//! Both are coerced to `Decimal` so that integrality and bound checks are
//! exact. Numbers outside `Decimal`'s range (magnitude above ~7.9e28, or more
//! than 28 fractional digits) are still numbers: they are kept as `f64` and
//! compared in floating point.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Number, Value};

/// A coerced form number or bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormNumber {
    Exact(Decimal),
    /// Finite or infinite, never NaN.
    Float(f64),
}

impl FormNumber {
    /// True if the number has no fractional part.
    pub fn is_integral(self) -> bool {
        match self {
            FormNumber::Exact(d) => d.fract().is_zero(),
            FormNumber::Float(f) => f.is_infinite() || f.fract() == 0.0,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            FormNumber::Exact(d) => d.to_f64().unwrap_or(f64::NAN),
            FormNumber::Float(f) => f,
        }
    }
}

impl PartialOrd for FormNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (FormNumber::Exact(a), FormNumber::Exact(b)) => Some(a.cmp(b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

/// Convert a JSON number (e.g. a schema bound) to a `FormNumber`.
pub fn from_json_number(n: &Number) -> Option<FormNumber> {
    parse_number(&n.to_string())
}

/// Coerce a form value to a number.
///
/// Accepts JSON numbers and numeric strings (surrounding whitespace is
/// ignored, scientific notation allowed). Everything else, including blank
/// strings, booleans, and spelled-out `inf` / `NaN`, is not a number.
pub fn coerce_number(value: &Value) -> Option<FormNumber> {
    match value {
        Value::Number(n) => from_json_number(n),
        Value::String(s) => parse_number(s.trim()),
        _ => None,
    }
}

fn parse_number(s: &str) -> Option<FormNumber> {
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = Decimal::from_str(s).or_else(|_| Decimal::from_scientific(s)) {
        return Some(FormNumber::Exact(d));
    }
    // Only digits, sign, point and exponent; keeps "inf" and "NaN" out.
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    f64::from_str(s)
        .ok()
        .filter(|f| !f.is_nan())
        .map(FormNumber::Float)
}
