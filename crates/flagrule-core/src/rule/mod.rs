//! Feature rules
//!
//! A feature is an OR over segments, a segment an AND over conditions
//! followed by an optional sticky percentage gate.

pub mod condition;
pub mod feature;
pub mod operator;
pub mod segment;

pub use condition::Condition;
pub use feature::Feature;
pub use operator::Operator;
pub use segment::{Segment, ROLLOUT_BUCKETS};
