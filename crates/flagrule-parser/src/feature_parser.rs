//! Feature parser

use crate::error::Result;
use crate::fields::get_sequence;
use crate::segment_parser::SegmentParser;
use flagrule_core::Feature;
use serde_json::Value as JsonValue;

/// Feature parser
pub struct FeatureParser;

impl FeatureParser {
    /// Parse a feature from structured config
    ///
    /// `segments` may be absent, in which case the feature never matches.
    pub fn parse(name: &str, config: &JsonValue) -> Result<Feature> {
        let segments = get_sequence(config, "segments")?
            .iter()
            .map(SegmentParser::parse)
            .collect::<Result<Vec<_>>>()?;

        log::debug!("compiled feature '{}' with {} segment(s)", name, segments.len());

        Ok(Feature::new(name, segments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use flagrule_core::FeatureContext;
    use serde_json::json;

    #[test]
    fn test_parse_feature() {
        let feature = FeatureParser::parse(
            "calendar-v2",
            &json!({
                "segments": [
                    {
                        "name": "internal user",
                        "rollout": 100,
                        "conditions": [
                            {"property": "user_email", "op": "in", "value": ["test@example.com"]}
                        ]
                    },
                    {"name": "everyone else"}
                ]
            }),
        )
        .unwrap();

        assert_eq!(feature.name, "calendar-v2");
        assert_eq!(feature.segments.len(), 2);
        assert_eq!(feature.segments[1].rollout, Some(0.0));

        let good = FeatureContext::empty().with("user_email", "test@example.com");
        let bad = FeatureContext::empty().with("user_email", "bad@example.com");
        assert!(feature.matches(&good));
        assert!(!feature.matches(&bad));
    }

    #[test]
    fn test_missing_segments() {
        let feature = FeatureParser::parse("empty", &json!({})).unwrap();
        assert!(feature.segments.is_empty());
        assert!(!feature.matches(&FeatureContext::empty()));
    }

    #[test]
    fn test_segments_must_be_sequence() {
        let err = FeatureParser::parse("f", &json!({"segments": "all"})).unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue { ref field, .. } if field == "segments"));
    }

    #[test]
    fn test_invalid_segment_does_not_raise() {
        let feature = FeatureParser::parse("calendar-v2", &json!({"segments": [["derp"]]})).unwrap();
        assert!(!feature.matches(&FeatureContext::empty()));
    }
}
