//! Audience segments
//!
//! For a segment to grant a feature every condition must pass; a segment
//! without conditions passes vacuously. A passing segment is then gated by
//! its rollout: the context identity is bucketed into `0..100` and the
//! segment admits the context when `bucket <= rollout`. A rollout of `0`
//! denies everything and no rollout admits everything.

use crate::context::FeatureContext;
use crate::rule::condition::Condition;
use serde::{Deserialize, Serialize};

/// Number of rollout buckets
pub const ROLLOUT_BUCKETS: u64 = 100;

/// Named audience rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Diagnostic name, not used in matching
    pub name: String,

    /// Conditions combined with AND
    pub conditions: Vec<Condition>,

    /// Percentage gate in `[0, 100]`
    pub rollout: Option<f64>,
}

impl Segment {
    /// Create a new segment
    pub fn new(name: impl Into<String>, conditions: Vec<Condition>, rollout: Option<f64>) -> Self {
        Self {
            name: name.into(),
            conditions,
            rollout,
        }
    }

    /// Segment that admits every context
    pub fn everyone(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new(), None)
    }

    /// Add a condition
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Set the rollout percentage
    pub fn with_rollout(mut self, rollout: f64) -> Self {
        self.rollout = Some(rollout);
        self
    }

    /// Check the segment against a context
    pub fn matches(&self, context: &FeatureContext) -> bool {
        if !self.conditions.iter().all(|c| c.matches(context)) {
            return false;
        }

        match self.rollout {
            None => true,
            // Explicit full deny, independent of bucket arithmetic
            Some(rollout) if rollout == 0.0 => false,
            Some(rollout) => {
                let bucket = context.identity().bucket(ROLLOUT_BUCKETS);
                bucket as f64 <= rollout
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Operator;
    use crate::types::Scalar;

    fn internal(rollout: Option<f64>) -> Segment {
        Segment::new(
            "internal",
            vec![Condition::new("email", Operator::Equal, Scalar::from("a@x.com"))],
            rollout,
        )
    }

    #[test]
    fn test_empty_segment_without_rollout_always_matches() {
        let segment = Segment::everyone("all");
        assert!(segment.matches(&FeatureContext::empty()));
        assert!(segment.matches(&FeatureContext::empty().with("id", 1)));
    }

    #[test]
    fn test_zero_rollout_never_matches() {
        let segment = Segment::everyone("all").with_rollout(0.0);
        for i in 0..200 {
            assert!(!segment.matches(&FeatureContext::empty().with("id", i)));
        }
        assert!(!internal(Some(0.0)).matches(&FeatureContext::empty().with("email", "a@x.com")));
    }

    #[test]
    fn test_full_rollout_admits_every_bucket() {
        let segment = Segment::everyone("all").with_rollout(100.0);
        for i in 0..200 {
            assert!(segment.matches(&FeatureContext::empty().with("id", i)));
        }
    }

    #[test]
    fn test_conditions_are_anded() {
        let segment = internal(None).with_condition(Condition::new(
            "plan",
            Operator::Equal,
            Scalar::from("pro"),
        ));

        let both = FeatureContext::empty().with("email", "a@x.com").with("plan", "pro");
        let one = FeatureContext::empty().with("email", "a@x.com").with("plan", "free");
        assert!(segment.matches(&both));
        assert!(!segment.matches(&one));
    }

    #[test]
    fn test_rollout_uses_inclusive_bucket_comparison() {
        let ctx = FeatureContext::empty().with("email", "a@x.com");
        let bucket = ctx.identity().bucket(ROLLOUT_BUCKETS) as f64;

        assert!(internal(Some(bucket.max(0.5))).matches(&ctx));
        if bucket >= 1.0 {
            assert!(!internal(Some(bucket - 0.5)).matches(&ctx));
        }
    }

    #[test]
    fn test_rollout_is_sticky() {
        let segment = Segment::everyone("half").with_rollout(50.0);
        for i in 0..50 {
            let ctx = FeatureContext::empty().with("user_id", i);
            let first = segment.matches(&ctx);
            let again = segment.matches(&FeatureContext::empty().with("user_id", i));
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_rollout_admits_a_proportion() {
        let segment = Segment::everyone("half").with_rollout(50.0);
        let admitted = (0..1000)
            .filter(|i| segment.matches(&FeatureContext::empty().with("user_id", format!("user-{}", i))))
            .count();

        // 51 of 100 buckets pass with the inclusive comparison
        assert!((400..=620).contains(&admitted), "admitted {}", admitted);
    }
}
