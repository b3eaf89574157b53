//! flagrule Core - Core types and matching rules for the flagrule engine
//!
//! This crate provides the pieces every other flagrule crate builds on:
//! - Value types for configured comparison values
//! - The evaluation context and its deterministic identity
//! - Conditions, segments and features with their matching rules
//! - Error types

pub mod context;
pub mod error;
pub mod rule;
pub mod types;

// Re-export commonly used types
pub use context::{ContextId, FeatureContext};
pub use error::{CoreError, Result};
pub use rule::{Condition, Feature, Operator, Segment};
pub use types::{ConditionValue, Scalar};
