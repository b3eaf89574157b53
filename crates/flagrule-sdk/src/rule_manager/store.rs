//! Raw config and compiled feature storage
//!
//! Both maps live behind a single lock so readers always observe a
//! matching pair. Every write to a raw entry gets a fresh revision and
//! drops the compiled entry for that name; a compile result is only
//! cached if the revision it was compiled from is still current.

use flagrule_core::Feature;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;

/// Raw config snapshot for one feature
#[derive(Debug, Clone)]
pub(super) struct RawEntry {
    pub(super) config: Arc<JsonValue>,
    pub(super) revision: u64,
}

/// Result of looking a feature up
pub(super) enum Lookup {
    Unconfigured,
    Compiled(Arc<Feature>),
    Configured(RawEntry),
}

#[derive(Debug, Default)]
pub(super) struct FeatureStore {
    raw: HashMap<String, RawEntry>,
    compiled: HashMap<String, Arc<Feature>>,
    // Never reset, so a compile started before `clear` cannot be cached
    // against a later entry.
    next_revision: u64,
}

impl FeatureStore {
    pub(super) fn lookup(&self, name: &str) -> Lookup {
        if let Some(feature) = self.compiled.get(name) {
            return Lookup::Compiled(feature.clone());
        }
        match self.raw.get(name) {
            Some(entry) => Lookup::Configured(entry.clone()),
            None => Lookup::Unconfigured,
        }
    }

    pub(super) fn insert(&mut self, name: &str, config: JsonValue) {
        self.next_revision += 1;
        self.raw.insert(
            name.to_string(),
            RawEntry {
                config: Arc::new(config),
                revision: self.next_revision,
            },
        );
        self.compiled.remove(name);
    }

    /// Cache `feature` if `revision` is still current for `name`
    ///
    /// Returns the cached feature, which may be an equivalent one another
    /// caller stored first.
    pub(super) fn cache(&mut self, name: &str, revision: u64, feature: Arc<Feature>) -> Option<Arc<Feature>> {
        let current = self.raw.get(name)?;
        if current.revision != revision {
            return None;
        }
        Some(
            self.compiled
                .entry(name.to_string())
                .or_insert(feature)
                .clone(),
        )
    }

    pub(super) fn clear(&mut self) {
        self.raw.clear();
        self.compiled.clear();
    }

    pub(super) fn contains(&self, name: &str) -> bool {
        self.raw.contains_key(name)
    }

    pub(super) fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.raw.keys().cloned().collect();
        names.sort();
        names
    }

    pub(super) fn entries(&self) -> Vec<(String, RawEntry)> {
        self.raw
            .iter()
            .map(|(name, entry)| (name.clone(), entry.clone()))
            .collect()
    }

    pub(super) fn len(&self) -> usize {
        self.raw.len()
    }

    pub(super) fn compiled_len(&self) -> usize {
        self.compiled.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compiled(store: &FeatureStore, name: &str) -> bool {
        matches!(store.lookup(name), Lookup::Compiled(_))
    }

    #[test]
    fn test_insert_invalidates_compiled() {
        let mut store = FeatureStore::default();
        store.insert("f", json!({"segments": []}));

        let Lookup::Configured(entry) = store.lookup("f") else {
            panic!("Expected configured entry");
        };
        assert!(store.cache("f", entry.revision, Arc::new(Feature::never("f"))).is_some());
        assert!(compiled(&store, "f"));

        store.insert("f", json!({"segments": []}));
        assert!(!compiled(&store, "f"));
        assert_eq!(store.compiled_len(), 0);
    }

    #[test]
    fn test_stale_compile_is_not_cached() {
        let mut store = FeatureStore::default();
        store.insert("f", json!({}));
        let Lookup::Configured(stale) = store.lookup("f") else {
            panic!("Expected configured entry");
        };

        store.insert("f", json!({"segments": []}));
        assert!(store.cache("f", stale.revision, Arc::new(Feature::never("f"))).is_none());
        assert!(!compiled(&store, "f"));
    }

    #[test]
    fn test_revisions_survive_clear() {
        let mut store = FeatureStore::default();
        store.insert("f", json!({}));
        let Lookup::Configured(before) = store.lookup("f") else {
            panic!("Expected configured entry");
        };

        store.clear();
        assert!(matches!(store.lookup("f"), Lookup::Unconfigured));

        store.insert("f", json!({}));
        assert!(store.cache("f", before.revision, Arc::new(Feature::never("f"))).is_none());
    }

    #[test]
    fn test_first_cached_compile_wins() {
        let mut store = FeatureStore::default();
        store.insert("f", json!({}));
        let Lookup::Configured(entry) = store.lookup("f") else {
            panic!("Expected configured entry");
        };

        let first = Arc::new(Feature::never("f"));
        let second = Arc::new(Feature::never("f"));
        let cached = store.cache("f", entry.revision, first.clone()).unwrap();
        let again = store.cache("f", entry.revision, second).unwrap();
        assert!(Arc::ptr_eq(&cached, &first));
        assert!(Arc::ptr_eq(&again, &first));
    }
}
