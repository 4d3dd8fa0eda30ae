//! formwork-eval: protected visibility and validation for form schemas.
//!
//! The evaluator reads the full schema (rules, visibility conditions) but
//! only ever returns booleans and messages. Pipeline for one pass:
//! 1. Project the full schema into a renderer schema
//! 2. Index the full schema's rules in a [`ProtectedContext`]
//! 3. Snapshot the form values
//! 4. Filter renderer fields by visibility, then validate what remains

pub mod condition;
pub mod config;
pub mod context;
pub mod facade;
pub mod field;
pub mod numeric;

pub use condition::{evaluate, Clause};
pub use config::{ConfigError, MessageCatalog, ValidationConfig};
pub use context::ProtectedContext;
pub use facade::{ValidationFacade, ValidationResult};
pub use field::validate_value;

use formwork_schema::{FormSchema, FormValues};

/// Validate `values` against `schema` in one call.
///
/// Only fields visible under `values` are checked.
pub fn validate_form(
    schema: &FormSchema,
    values: &FormValues,
    config: &ValidationConfig,
) -> ValidationResult {
    let renderer = formwork_schema::project(schema);
    ValidationFacade::new(schema, &renderer, values)
        .with_config(config.clone())
        .validate()
}

// ──────────────────────────────────────────────
// Integration tests
// ──────────────────────────────────────────────
