//! Condition operators

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator of a condition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    /// Equal (`equal`)
    Equal,
    /// Not equal (`not_equal`)
    NotEqual,
    /// Member of a list (`in`)
    In,
    /// Not a member of a list (`not_in`)
    NotIn,
    /// Anything else; never matches
    Unknown(String),
}

impl Operator {
    /// Parse an operator name. Unrecognised names are kept as `Unknown`.
    pub fn parse(name: &str) -> Self {
        match name {
            "equal" => Operator::Equal,
            "not_equal" => Operator::NotEqual,
            "in" => Operator::In,
            "not_in" => Operator::NotIn,
            other => Operator::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Operator::Equal => "equal",
            Operator::NotEqual => "not_equal",
            Operator::In => "in",
            Operator::NotIn => "not_in",
            Operator::Unknown(name) => name,
        }
    }

    /// Returns true for `in` and `not_in`, which need a list value
    pub fn is_membership(&self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }

    /// False for operators that always evaluate to `false`
    pub fn is_known(&self) -> bool {
        !matches!(self, Operator::Unknown(_))
    }
}

impl From<String> for Operator {
    fn from(name: String) -> Self {
        Operator::parse(&name)
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
