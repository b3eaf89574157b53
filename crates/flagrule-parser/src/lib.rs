//! flagrule Parser - structured configuration to feature rules
//!
//! This crate compiles the rule-engine configuration shape (features,
//! segments, conditions) into `flagrule-core` types and parses whole flag
//! documents from YAML or JSON text.

pub mod condition_parser;
pub mod document_parser;
pub mod error;
pub mod feature_parser;
pub mod fields;
pub mod segment_parser;

// Re-export main parser types
pub use condition_parser::ConditionParser;
pub use document_parser::{DocumentFormat, DocumentParser};
pub use error::{ParseError, Result};
pub use feature_parser::FeatureParser;
pub use segment_parser::SegmentParser;
