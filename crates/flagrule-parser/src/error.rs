//! Parser error types

use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// Condition missing `property`, `op` or `value`, or carrying a bad shape
    #[error("Condition with config {config} is invalid.")]
    InvalidCondition { config: String },

    /// Invalid field value
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Document is not a mapping of flag names to definitions
    #[error("Invalid flag document: {0}")]
    InvalidDocument(String),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ParseError {
    pub(crate) fn invalid_value(field: &str, message: impl Into<String>) -> Self {
        ParseError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
