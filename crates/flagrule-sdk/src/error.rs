//! SDK error types
//!
//! Configuration errors come from flag authors and are fixed by correcting
//! configuration. Integration errors come from the host's context builder
//! and point at a bug in the host.

use flagrule_core::CoreError;
use flagrule_parser::ParseError;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Rule-engine feature config is not a mapping
    #[error("Feature '{feature}' config must be a mapping. Received {actual}")]
    InvalidFeatureConfig { feature: String, actual: &'static str },

    /// Boolean flag value is not `true`/`false`
    #[error("Flag values must be true/false. Received {actual} for '{feature}'")]
    NotBoolean { feature: String, actual: &'static str },

    /// Stored config failed to compile into a feature
    #[error("Feature '{feature}' failed to compile: {source}")]
    Compile {
        feature: String,
        #[source]
        source: ParseError,
    },

    /// Context builder returned something that is not a context
    #[error("Generated context for {feature} is invalid: {source}")]
    InvalidContext {
        feature: String,
        #[source]
        source: CoreError,
    },

    /// Flag document could not be parsed
    #[error("Parser error: {0}")]
    ParseError(#[from] ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SdkError {
    /// True for mistakes in flag configuration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SdkError::InvalidFeatureConfig { .. }
                | SdkError::NotBoolean { .. }
                | SdkError::Compile { .. }
                | SdkError::ParseError(_)
        )
    }

    /// True when the host's context builder misbehaved
    pub fn is_integration_error(&self) -> bool {
        matches!(self, SdkError::InvalidContext { .. })
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
