//! Condition parser
//!
//! Parses `{ "property": ..., "op": ..., "value": ... }` fragments into
//! `Condition`s. All three keys are required and must be non-null; any
//! failure reports the offending fragment verbatim.

use crate::error::{ParseError, Result};
use crate::fields::get_present;
use flagrule_core::{Condition, ConditionValue, Operator};
use serde_json::Value as JsonValue;

/// Condition parser
pub struct ConditionParser;

impl ConditionParser {
    /// Parse a condition from structured config
    pub fn parse(config: &JsonValue) -> Result<Condition> {
        let invalid = || ParseError::InvalidCondition {
            config: config.to_string(),
        };

        let property = get_present(config, "property").ok_or_else(invalid)?;
        let op = get_present(config, "op").ok_or_else(invalid)?;
        let value = get_present(config, "value").ok_or_else(invalid)?;

        let property = property.as_str().ok_or_else(invalid)?;
        let op = op.as_str().map(Operator::parse).ok_or_else(invalid)?;
        let value = ConditionValue::from_json(value).map_err(|e| {
            log::debug!("condition value rejected: {}", e);
            invalid()
        })?;

        if !op.is_known() {
            log::warn!(
                "condition on '{}' uses unknown operator '{}' and will never match",
                property,
                op
            );
        }

        Ok(Condition::new(property, op, value))
    }
}
