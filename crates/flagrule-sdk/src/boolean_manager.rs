//! Boolean feature manager
//!
//! The minimal implementation of the manager contract: each feature is
//! simply on or off, and the context is ignored.

use crate::context_builder::RawContext;
use crate::error::{Result, SdkError};
use crate::manager::FeatureManager;
use flagrule_core::types::json_type_name;
use flagrule_parser::{DocumentFormat, DocumentParser};
use parking_lot::RwLock;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Feature manager backed by a map of names to booleans
#[derive(Debug, Default)]
pub struct BooleanManager {
    flags: RwLock<HashMap<String, bool>>,
}

impl BooleanManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager from `(name, enabled)` pairs
    pub fn from_flags<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        Self {
            flags: RwLock::new(flags.into_iter().map(|(n, v)| (n.into(), v)).collect()),
        }
    }

    /// Typed form of `add`
    pub fn set(&self, name: impl Into<String>, enabled: bool) -> &Self {
        self.flags.write().insert(name.into(), enabled);
        self
    }

    /// Add every flag in a YAML or JSON document of `name: bool` pairs
    pub fn load_document(&self, content: &str, format: DocumentFormat) -> Result<usize> {
        let flags = DocumentParser::parse_booleans(content, format)?;
        let count = flags.len();
        self.flags.write().extend(flags);
        tracing::info!("Loaded {} boolean flag(s)", count);
        Ok(count)
    }

    /// Number of configured flags
    pub fn len(&self) -> usize {
        self.flags.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FeatureManager for BooleanManager {
    fn has(&self, name: &str, _context: &RawContext) -> Result<bool> {
        Ok(self.flags.read().get(name).copied().unwrap_or(false))
    }

    fn insert(&self, name: &str, config: JsonValue) -> Result<()> {
        match config {
            JsonValue::Bool(enabled) => {
                self.set(name, enabled);
                Ok(())
            }
            other => Err(SdkError::NotBoolean {
                feature: name.to_string(),
                actual: json_type_name(&other),
            }),
        }
    }

    fn reset(&self) {
        self.flags.write().clear();
    }
}
