//! Shared feature manager contract

use crate::context_builder::RawContext;
use crate::error::Result;
use serde_json::Value as JsonValue;

/// A collection of features that can be checked against application state
///
/// Unknown feature names are never an error: `has` returns `false` for
/// them, since hosts routinely probe flags that do not exist yet.
pub trait FeatureManager: Send + Sync {
    /// Check whether a feature is enabled for `context`
    fn has(&self, name: &str, context: &RawContext) -> Result<bool>;

    /// Store config for a feature, replacing any previous config
    fn insert(&self, name: &str, config: JsonValue) -> Result<()>;

    /// Clear every feature
    fn reset(&self);

    /// Check a feature with an empty context
    fn is_enabled(&self, name: &str) -> Result<bool> {
        self.has(name, &RawContext::new())
    }

    /// Chainable form of [`FeatureManager::insert`]
    fn add(&self, name: &str, config: JsonValue) -> Result<&Self>
    where
        Self: Sized,
    {
        self.insert(name, config)?;
        Ok(self)
    }
}
