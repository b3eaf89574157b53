//! Error types for flagrule Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A configured comparison value has an unsupported shape
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// A context representation produced by a host is not a mapping
    #[error("Invalid context: {0}")]
    InvalidContext(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
