//! Validation configuration: message catalog and optional strict checks.
//!
//! Every field has a default, so a TOML file only needs the keys it
//! overrides:
//!
//! ```toml
//! enforce_options = true
//!
//! [messages]
//! required = "Bitte ausfüllen"
//! ```

use serde::{Deserialize, Serialize};

/// Errors loading a validation configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid validation config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// User-facing validation messages.
///
/// `{min}`, `{max}`, and `{length}` are replaced with the violated bound.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MessageCatalog {
    pub required: String,
    pub invalid_number: String,
    pub decimal_not_allowed: String,
    pub below_minimum: String,
    pub above_maximum: String,
    pub invalid_email: String,
    pub too_long: String,
    pub invalid_option: String,
    pub invalid_options: String,
    pub invalid_date: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        MessageCatalog {
            required: "This field is required".to_string(),
            invalid_number: "Please enter a valid number".to_string(),
            decimal_not_allowed: "Decimal values are not allowed".to_string(),
            below_minimum: "Value must be at least {min}".to_string(),
            above_maximum: "Value must not exceed {max}".to_string(),
            invalid_email: "Please enter a valid email address".to_string(),
            too_long: "Maximum length is {length}".to_string(),
            invalid_option: "Please select a valid option".to_string(),
            invalid_options: "Please select valid options".to_string(),
            invalid_date: "Please enter a valid date".to_string(),
        }
    }
}

impl MessageCatalog {
    pub fn min_violation(&self, min: &serde_json::Number) -> String {
        self.below_minimum.replace("{min}", &min.to_string())
    }

    pub fn max_violation(&self, max: &serde_json::Number) -> String {
        self.above_maximum.replace("{max}", &max.to_string())
    }

    pub fn length_violation(&self, length: u64) -> String {
        self.too_long.replace("{length}", &length.to_string())
    }
}

/// Switches and messages used by the field validator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ValidationConfig {
    pub messages: MessageCatalog,
    /// Enforce `props.maxlength` on Text and Email fields.
    pub enforce_max_length: bool,
    /// Require Radio/Select/Checkbox values to match a declared option.
    pub enforce_options: bool,
    /// Require Date values to be `YYYY-MM-DD` calendar dates.
    pub enforce_date_format: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig {
            messages: MessageCatalog::default(),
            enforce_max_length: true,
            enforce_options: false,
            enforce_date_format: false,
        }
    }
}

impl ValidationConfig {
    /// All optional checks switched on.
    pub fn strict() -> Self {
        ValidationConfig {
            enforce_options: true,
            enforce_date_format: true,
            ..Self::default()
        }
    }

    /// Load a configuration from TOML, filling unspecified keys with defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
