//! Evaluation context
//!
//! A `FeatureContext` is the immutable bag of attributes a feature is
//! checked against. Its identity is derived from content only, so equal
//! data lands in the same rollout bucket in every process.

mod canonical;

pub use canonical::canonical_json;

use crate::error::{CoreError, Result};
use crate::types::json_type_name;
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Deterministic numeric identity of a context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u128);

impl ContextId {
    pub fn new(value: u128) -> Self {
        ContextId(value)
    }

    pub fn value(&self) -> u128 {
        self.0
    }

    /// Bucket in `0..modulus`. A zero modulus yields bucket 0.
    pub fn bucket(&self, modulus: u64) -> u64 {
        if modulus == 0 {
            return 0;
        }
        (self.0 % modulus as u128) as u64
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

/// Attribute bag used when matching features
#[derive(Debug, Default)]
pub struct FeatureContext {
    data: BTreeMap<String, JsonValue>,
    identity: OnceLock<ContextId>,
}

impl FeatureContext {
    /// Create a context from attribute data
    pub fn new(data: BTreeMap<String, JsonValue>) -> Self {
        Self {
            data,
            identity: OnceLock::new(),
        }
    }

    /// Create a context without attributes
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add an attribute while building a context
    pub fn with(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.data.insert(key.into(), value.into());
        self.identity = OnceLock::new();
        self
    }

    /// Get a value by key, `None` when absent
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.data.get(key)
    }

    /// Presence test; stored `false`, `0`, `""` and `null` all count as present
    pub fn has(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Attributes ordered by key
    pub fn data(&self) -> &BTreeMap<String, JsonValue> {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Canonical identity used for rollout bucketing
    pub fn identity(&self) -> ContextId {
        *self
            .identity
            .get_or_init(|| ContextId(canonical::identity_of(&canonical_json(self.data()))))
    }
}

impl Clone for FeatureContext {
    fn clone(&self) -> Self {
        let identity = OnceLock::new();
        if let Some(id) = self.identity.get() {
            let _ = identity.set(*id);
        }
        Self {
            data: self.data.clone(),
            identity,
        }
    }
}

impl PartialEq for FeatureContext {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl From<Map<String, JsonValue>> for FeatureContext {
    fn from(map: Map<String, JsonValue>) -> Self {
        FeatureContext::new(map.into_iter().collect())
    }
}

impl From<BTreeMap<String, JsonValue>> for FeatureContext {
    fn from(data: BTreeMap<String, JsonValue>) -> Self {
        FeatureContext::new(data)
    }
}

impl TryFrom<JsonValue> for FeatureContext {
    type Error = CoreError;

    fn try_from(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(map) => Ok(map.into()),
            other => Err(CoreError::InvalidContext(format!(
                "expected an object, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, JsonValue)> for FeatureContext {
    fn from_iter<T: IntoIterator<Item = (K, JsonValue)>>(iter: T) -> Self {
        FeatureContext::new(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_and_has() {
        let ctx = FeatureContext::empty()
            .with("email", "a@x.com")
            .with("beta", false)
            .with("count", 0)
            .with("nickname", "")
            .with("team", JsonValue::Null);

        assert_eq!(ctx.get("email"), Some(&json!("a@x.com")));
        assert_eq!(ctx.get("missing"), None);
        assert!(ctx.has("beta"));
        assert!(ctx.has("count"));
        assert!(ctx.has("nickname"));
        assert!(ctx.has("team"));
        assert!(!ctx.has("missing"));
        assert_eq!(ctx.len(), 5);
    }

    #[test]
    fn test_identity_depends_on_content_only() {
        let a = FeatureContext::try_from(json!({"email": "a@x.com", "plan": "pro"})).unwrap();
        let b = FeatureContext::empty()
            .with("plan", "pro")
            .with("email", "a@x.com");

        assert_eq!(a.identity(), b.identity());
        assert_eq!(a, b);

        let c = FeatureContext::try_from(json!({"email": "b@x.com", "plan": "pro"})).unwrap();
        assert_ne!(a.identity(), c.identity());
    }

    #[test]
    fn test_data_is_ordered_by_key() {
        let ctx = FeatureContext::empty().with("plan", "pro").with("email", "a@x.com");
        let keys: Vec<_> = ctx.data().keys().map(String::as_str).collect();
        assert_eq!(keys, ["email", "plan"]);
    }

    #[test]
    fn test_identity_survives_clone() {
        let ctx = FeatureContext::empty().with("id", 7);
        let id = ctx.identity();
        assert_eq!(ctx.clone().identity(), id);
    }

    #[test]
    fn test_with_resets_identity() {
        let ctx = FeatureContext::empty().with("id", 7);
        let before = ctx.identity();
        let ctx = ctx.with("id", 8);
        assert_ne!(ctx.identity(), before);
    }

    #[test]
    fn test_try_from_rejects_non_objects() {
        let err = FeatureContext::try_from(json!(["a"])).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidContext("expected an object, got array".to_string())
        );
        assert!(FeatureContext::try_from(json!("ctx")).is_err());
        assert!(FeatureContext::try_from(json!(null)).is_err());
    }

    #[test]
    fn test_bucket_range() {
        assert_eq!(ContextId::new(1234).bucket(100), 34);
        assert_eq!(ContextId::new(u128::MAX).bucket(100), (u128::MAX % 100) as u64);
        assert_eq!(ContextId::new(5).bucket(0), 0);
    }
}
