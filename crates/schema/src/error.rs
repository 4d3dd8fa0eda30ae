/// Errors raised while importing or editing a form schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The document is not valid JSON or does not have the schema's shape.
    #[error("invalid schema document: {0}")]
    Json(#[from] serde_json::Error),

    /// An item is stored under a key that differs from its `name`.
    #[error("item key '{key}' does not match field name '{name}'")]
    KeyMismatch { key: String, name: String },

    /// Two options of one choice field share the same value.
    #[error("field '{field}' has duplicate option value '{value}'")]
    DuplicateOption { field: String, value: String },

    /// `allow_decimal` must be `0` or `1`.
    #[error("field '{field}' has allow_decimal {value}, expected 0 or 1")]
    InvalidAllowDecimal { field: String, value: u8 },

    /// A prefill value that is not a string, number, or boolean.
    #[error("field '{field}' has a prefill value that is not a string, number, or boolean")]
    InvalidPrefill { field: String },

    /// A field is named after a key the renderer projection must never carry.
    #[error("field name '{0}' is reserved")]
    ReservedFieldName(String),

    /// An edit referred to a field the schema does not contain.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// An edit tried to change a field's name in place.
    #[error("field '{from}' cannot be renamed to '{to}' in place")]
    RenamedField { from: String, to: String },
}
