//! Single attribute comparison

use crate::context::FeatureContext;
use crate::rule::operator::Operator;
use crate::types::ConditionValue;
use serde::{Deserialize, Serialize};

/// Compares one context attribute against a configured value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Context attribute to read
    pub property: String,

    /// Comparison operator
    pub op: Operator,

    /// Value to compare against
    pub value: ConditionValue,
}

impl Condition {
    /// Create a new condition
    pub fn new(property: impl Into<String>, op: Operator, value: impl Into<ConditionValue>) -> Self {
        Self {
            property: property.into(),
            op,
            value: value.into(),
        }
    }

    /// Check the condition against a context
    ///
    /// A missing attribute never matches, whatever the operator, so
    /// `not_equal` and `not_in` do not treat "absent" as "different".
    /// Membership operators against a non-list value and unknown
    /// operators are silent non-matches.
    pub fn matches(&self, context: &FeatureContext) -> bool {
        let Some(actual) = context.get(&self.property) else {
            return false;
        };

        match &self.op {
            Operator::Equal => self.value.equals_json(actual),
            Operator::NotEqual => !self.value.equals_json(actual),
            Operator::In => self.value.contains_json(actual).unwrap_or(false),
            Operator::NotIn => self.value.contains_json(actual).is_some_and(|found| !found),
            Operator::Unknown(_) => false,
        }
    }
}
