//! flagrule SDK
//!
//! High-level API for checking feature flags.
//!
//! Two managers implement the shared [`FeatureManager`] contract:
//! - [`RuleManager`] evaluates segments, conditions and percentage
//!   rollouts against a context produced by a [`ContextBuilder`]
//! - [`BooleanManager`] is a plain map of flag names to `true`/`false`
//!
//! Managers use interior mutability; construct one at startup and share
//! it behind an `Arc` with request handlers.

pub mod boolean_manager;
pub mod builder;
pub mod config;
pub mod context_builder;
pub mod error;
pub mod manager;
pub mod rule_manager;

// Re-export main types
pub use boolean_manager::BooleanManager;
pub use builder::RuleManagerBuilder;
pub use config::ManagerConfig;
pub use context_builder::{ContextBuilder, IdentityContextBuilder, RawContext};
pub use error::{Result, SdkError};
pub use manager::FeatureManager;
pub use rule_manager::RuleManager;

// Re-export commonly used types from dependencies
pub use flagrule_core::{Feature, FeatureContext};
pub use flagrule_parser::DocumentFormat;
