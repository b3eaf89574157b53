//! Context builders
//!
//! A context builder projects the raw mapping a caller passes to
//! `has` into the flat attribute bag features are matched against.
//! Any `Fn(&RawContext) -> serde_json::Value` is a builder; the value it
//! returns must be a JSON object.

use flagrule_core::{FeatureContext, Result};
use serde_json::{Map, Value as JsonValue};

/// Raw context passed by callers
pub type RawContext = Map<String, JsonValue>;

/// Turns a raw caller context into a feature context
pub trait ContextBuilder: Send + Sync {
    fn build(&self, raw: &RawContext) -> Result<FeatureContext>;
}

impl<F> ContextBuilder for F
where
    F: Fn(&RawContext) -> JsonValue + Send + Sync,
{
    fn build(&self, raw: &RawContext) -> Result<FeatureContext> {
        FeatureContext::try_from(self(raw))
    }
}

/// Uses the raw context as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityContextBuilder;

impl ContextBuilder for IdentityContextBuilder {
    fn build(&self, raw: &RawContext) -> Result<FeatureContext> {
        Ok(FeatureContext::from(raw.clone()))
    }
}
