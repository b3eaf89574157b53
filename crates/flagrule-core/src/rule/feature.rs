//! Named features

use crate::context::FeatureContext;
use crate::rule::segment::Segment;
use serde::{Deserialize, Serialize};

/// Named flag, enabled when any of its segments matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,

    /// Segments combined with OR
    pub segments: Vec<Segment>,
}

impl Feature {
    /// Create a new feature
    pub fn new(name: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            name: name.into(),
            segments,
        }
    }

    /// Feature without segments, which never matches
    pub fn never(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Add a segment
    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Check whether any segment grants the feature to `context`
    pub fn matches(&self, context: &FeatureContext) -> bool {
        match self.segments.iter().find(|s| s.matches(context)) {
            Some(segment) => {
                log::trace!("feature '{}' granted by segment '{}'", self.name, segment.name);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{Condition, Operator};
    use crate::types::{ConditionValue, Scalar};

    fn by_email(email: &str) -> Segment {
        Segment::new(
            email,
            vec![Condition::new("email", Operator::Equal, Scalar::from(email))],
            None,
        )
    }

    #[test]
    fn test_feature_without_segments_never_matches() {
        let feature = Feature::never("calendar-v2");
        assert!(!feature.matches(&FeatureContext::empty()));
        assert!(!feature.matches(&FeatureContext::empty().with("email", "a@x.com")));
    }

    #[test]
    fn test_segments_are_ored() {
        let feature = Feature::new("calendar-v2", vec![by_email("a@x.com"), by_email("b@x.com")]);

        assert!(feature.matches(&FeatureContext::empty().with("email", "a@x.com")));
        assert!(feature.matches(&FeatureContext::empty().with("email", "b@x.com")));
        assert!(!feature.matches(&FeatureContext::empty().with("email", "c@x.com")));
    }

    #[test]
    fn test_denying_segment_does_not_block_others() {
        let feature = Feature::never("shop-v2")
            .with_segment(Segment::everyone("off").with_rollout(0.0))
            .with_segment(Segment::new(
                "staff",
                vec![Condition::new("role", Operator::In, ConditionValue::list(["admin", "staff"]))],
                None,
            ));

        assert!(feature.matches(&FeatureContext::empty().with("role", "staff")));
        assert!(!feature.matches(&FeatureContext::empty().with("role", "guest")));
    }

    #[test]
    fn test_feature_serde() {
        let feature = Feature::new("f", vec![Segment::everyone("all").with_rollout(25.0)]);
        let json = serde_json::to_string(&feature).unwrap();
        let back: Feature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, feature);
    }
}
