//! Type system for flagrule
//!
//! Configured comparison values are a closed set of shapes: a single
//! scalar, or an ordered list of scalars.

pub mod value;

pub use value::{json_type_name, ConditionValue, Scalar};
