//! Configured comparison values
//!
//! `Scalar` and `ConditionValue` model what a condition may compare a
//! context attribute against. Context attributes themselves stay plain
//! `serde_json::Value`s, so every comparison here is scalar-vs-JSON.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value as JsonValue};
use std::fmt;

/// A single configured value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// Value side of a condition: one scalar, or a list for membership tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

/// Name of a JSON value's type, for diagnostics
pub fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

impl Scalar {
    /// Convert a JSON value into a scalar. Null, arrays and objects are not scalars.
    pub fn from_json(value: &JsonValue) -> Option<Scalar> {
        match value {
            JsonValue::Bool(b) => Some(Scalar::Bool(*b)),
            JsonValue::Number(n) => Some(Self::from_number(n)),
            JsonValue::String(s) => Some(Scalar::String(s.clone())),
            JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
        }
    }

    fn from_number(n: &Number) -> Scalar {
        match n.as_i64() {
            Some(i) => Scalar::Int(i),
            // u64 beyond i64::MAX and real floats both land here
            None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
        }
    }

    /// Compare against a context value
    ///
    /// Strings compare by content, booleans by value and numbers
    /// numerically, so `1` equals `1.0`. Cross-type pairs never match.
    pub fn matches_json(&self, other: &JsonValue) -> bool {
        match (self, other) {
            (Scalar::Bool(a), JsonValue::Bool(b)) => a == b,
            (Scalar::String(a), JsonValue::String(b)) => a == b,
            (Scalar::Int(a), JsonValue::Number(b)) => {
                if let Some(b) = b.as_i64() {
                    *a == b
                } else if b.is_u64() {
                    // Only reachable for values above i64::MAX
                    false
                } else {
                    b.as_f64().is_some_and(|b| float_equals_int(b, *a))
                }
            }
            (Scalar::Float(a), JsonValue::Number(b)) => {
                if let Some(b) = b.as_i64() {
                    float_equals_int(*a, b)
                } else if let Some(b) = b.as_u64() {
                    a.fract() == 0.0 && *a >= 0.0 && *a < U64_BOUND && *a as u64 == b
                } else {
                    b.as_f64().is_some_and(|b| *a == b)
                }
            }
            _ => false,
        }
    }
}

// 2^63 and 2^64, the first floats past the integer ranges
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

/// Exact comparison of a float with an integer, without rounding the integer
fn float_equals_int(float: f64, int: i64) -> bool {
    float.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&float) && float as i64 == int
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::String(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl ConditionValue {
    /// Build a list value
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        ConditionValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Convert a JSON value into a condition value
    ///
    /// Arrays become lists and every element must itself be a scalar.
    pub fn from_json(value: &JsonValue) -> Result<ConditionValue> {
        match value {
            JsonValue::Array(items) => items
                .iter()
                .map(|item| {
                    Scalar::from_json(item).ok_or_else(|| {
                        CoreError::InvalidValue(format!(
                            "list elements must be scalars, got {}",
                            json_type_name(item)
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(ConditionValue::List),
            other => Scalar::from_json(other).map(ConditionValue::Scalar).ok_or_else(|| {
                CoreError::InvalidValue(format!(
                    "expected a scalar or a list of scalars, got {}",
                    json_type_name(other)
                ))
            }),
        }
    }

    /// Returns the list items when this value is a list
    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            ConditionValue::List(items) => Some(items),
            ConditionValue::Scalar(_) => None,
        }
    }

    /// Value equality against a context value
    ///
    /// A list equals a context array of the same length whose elements
    /// match pairwise.
    pub fn equals_json(&self, other: &JsonValue) -> bool {
        match (self, other) {
            (ConditionValue::Scalar(s), other) => s.matches_json(other),
            (ConditionValue::List(items), JsonValue::Array(values)) => {
                items.len() == values.len()
                    && items.iter().zip(values).all(|(item, value)| item.matches_json(value))
            }
            (ConditionValue::List(_), _) => false,
        }
    }

    /// Membership test. `None` when this value is not a list.
    pub fn contains_json(&self, other: &JsonValue) -> Option<bool> {
        self.as_list()
            .map(|items| items.iter().any(|item| item.matches_json(other)))
    }
}

impl From<Scalar> for ConditionValue {
    fn from(value: Scalar) -> Self {
        ConditionValue::Scalar(value)
    }
}
