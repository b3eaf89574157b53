//! Segment parser
//!
//! `name` defaults to `"unknown"` and `rollout` to `0`, so a segment
//! without an explicit rollout denies every context. A fragment that is
//! not a mapping has no recognised keys and compiles to those defaults.

use crate::condition_parser::ConditionParser;
use crate::error::{ParseError, Result};
use crate::fields::{get_optional_f64, get_optional_string, get_sequence};
use flagrule_core::Segment;
use serde_json::Value as JsonValue;

/// Name given to segments without one
pub const DEFAULT_SEGMENT_NAME: &str = "unknown";

/// Rollout given to segments without one
pub const DEFAULT_ROLLOUT: f64 = 0.0;

/// Segment parser
pub struct SegmentParser;

impl SegmentParser {
    /// Parse a segment from structured config
    pub fn parse(config: &JsonValue) -> Result<Segment> {
        let conditions = get_sequence(config, "conditions")?
            .iter()
            .map(ConditionParser::parse)
            .collect::<Result<Vec<_>>>()?;

        let name = get_optional_string(config, "name")?
            .unwrap_or_else(|| DEFAULT_SEGMENT_NAME.to_string());

        let rollout = get_optional_f64(config, "rollout")?.unwrap_or(DEFAULT_ROLLOUT);
        if !(0.0..=100.0).contains(&rollout) {
            return Err(ParseError::invalid_value(
                "rollout",
                format!("{} is outside 0..=100 in segment '{}'", rollout, name),
            ));
        }

        if !config.is_object() {
            log::debug!("segment config {} is not a mapping, using defaults", config);
        }

        Ok(Segment::new(name, conditions, Some(rollout)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagrule_core::Operator;
    use serde_json::json;

    #[test]
    fn test_parse_segment() {
        let segment = SegmentParser::parse(&json!({
            "name": "internal user",
            "rollout": 50,
            "conditions": [
                {"property": "user_email", "op": "in", "value": ["test@example.com"]},
                {"property": "plan", "op": "equal", "value": "pro"},
            ],
        }))
        .unwrap();

        assert_eq!(segment.name, "internal user");
        assert_eq!(segment.rollout, Some(50.0));
        assert_eq!(segment.conditions.len(), 2);
        assert_eq!(segment.conditions[1].op, Operator::Equal);
    }

    #[test]
    fn test_defaults() {
        let segment = SegmentParser::parse(&json!({})).unwrap();
        assert_eq!(segment.name, DEFAULT_SEGMENT_NAME);
        assert_eq!(segment.rollout, Some(0.0));
        assert!(segment.conditions.is_empty());
    }

    #[test]
    fn test_non_mapping_segment_uses_defaults() {
        let segment = SegmentParser::parse(&json!(["derp"])).unwrap();
        assert_eq!(segment.name, DEFAULT_SEGMENT_NAME);
        assert_eq!(segment.rollout, Some(0.0));
    }

    #[test]
    fn test_fractional_rollout() {
        let segment = SegmentParser::parse(&json!({"rollout": 12.5})).unwrap();
        assert_eq!(segment.rollout, Some(12.5));
    }

    #[test]
    fn test_condition_errors_propagate() {
        let err = SegmentParser::parse(&json!({
            "name": "internal users",
            "conditions": [["derp"]],
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), r#"Condition with config ["derp"] is invalid."#);
    }

    #[test]
    fn test_rollout_out_of_range() {
        for rollout in [json!(-1), json!(100.5), json!(1000)] {
            let err = SegmentParser::parse(&json!({"rollout": rollout})).unwrap_err();
            assert!(matches!(err, ParseError::InvalidValue { ref field, .. } if field == "rollout"));
        }
    }

    #[test]
    fn test_conditions_must_be_sequence() {
        let err = SegmentParser::parse(&json!({"conditions": {"property": "x"}})).unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue { ref field, .. } if field == "conditions"));
    }
}
