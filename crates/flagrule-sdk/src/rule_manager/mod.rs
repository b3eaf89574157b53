//! Rule-based feature manager
//!
//! Holds raw feature config per name and compiles it into a [`Feature`]
//! on first use. Compiled features are cached until the config for that
//! name changes or the manager is reset.

mod store;

use self::store::{FeatureStore, Lookup};
use crate::config::ManagerConfig;
use crate::context_builder::{ContextBuilder, RawContext};
use crate::error::{Result, SdkError};
use crate::manager::FeatureManager;
use flagrule_core::types::json_type_name;
use flagrule_core::Feature;
use flagrule_parser::{DocumentFormat, DocumentParser, FeatureParser};
use parking_lot::RwLock;
use serde_json::Value as JsonValue;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Feature manager that evaluates segment and condition rules
pub struct RuleManager {
    context_builder: Arc<dyn ContextBuilder>,
    config: ManagerConfig,
    store: RwLock<FeatureStore>,
}

impl RuleManager {
    /// Create an empty manager
    pub fn new(context_builder: impl ContextBuilder + 'static) -> Self {
        Self::with_config(context_builder, ManagerConfig::default())
    }

    /// Create an empty manager with explicit settings
    pub fn with_config(context_builder: impl ContextBuilder + 'static, config: ManagerConfig) -> Self {
        Self::from_parts(Arc::new(context_builder), config)
    }

    pub(crate) fn from_parts(context_builder: Arc<dyn ContextBuilder>, config: ManagerConfig) -> Self {
        Self {
            context_builder,
            config,
            store: RwLock::new(FeatureStore::default()),
        }
    }

    /// Create a manager pre-populated with feature config
    ///
    /// Features are stored, not compiled; compilation stays lazy.
    pub fn from_features<I, S>(context_builder: impl ContextBuilder + 'static, features: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, JsonValue)>,
        S: AsRef<str>,
    {
        let manager = Self::new(context_builder);
        manager.extend(features)?;
        Ok(manager)
    }

    /// Add many features at once
    ///
    /// Every entry is checked before any is stored, so a rejected entry
    /// leaves the manager unchanged.
    pub fn extend<I, S>(&self, features: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, JsonValue)>,
        S: AsRef<str>,
    {
        let mut staged = Vec::new();
        for (name, config) in features {
            let name = name.as_ref();
            self.check(name, &config)?;
            staged.push((name.to_string(), config));
        }

        let count = staged.len();
        let mut store = self.store.write();
        for (name, config) in staged {
            store.insert(&name, config);
        }
        tracing::debug!("Stored {} feature config(s)", count);
        Ok(())
    }

    /// Shape check, plus an eager compile when `validate_on_add` is set
    fn check(&self, name: &str, config: &JsonValue) -> Result<()> {
        if !config.is_object() {
            tracing::warn!(feature = name, "Rejected non-mapping feature config");
            return Err(SdkError::InvalidFeatureConfig {
                feature: name.to_string(),
                actual: json_type_name(config),
            });
        }

        if self.config.validate_on_add {
            compile(name, config)?;
        }
        Ok(())
    }

    /// Add every feature in a YAML or JSON flag document
    pub fn load_document(&self, content: &str, format: DocumentFormat) -> Result<usize> {
        let entries = DocumentParser::parse_features(content, format)?;
        let count = entries.len();
        self.extend(entries)?;
        tracing::info!("Loaded {} feature(s) from {:?} document", count, format);
        Ok(count)
    }

    /// Add every feature in a flag document file
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let count = self.load_document(&content, DocumentFormat::from_path(path))?;
        tracing::info!("Loaded flag document {}", path.display());
        Ok(count)
    }

    /// Compiled feature for `name`, compiling on first access
    ///
    /// Returns `Ok(None)` for names that were never configured.
    pub fn feature(&self, name: &str) -> Result<Option<Arc<Feature>>> {
        let entry = match self.store.read().lookup(name) {
            Lookup::Unconfigured => return Ok(None),
            Lookup::Compiled(feature) => return Ok(Some(feature)),
            Lookup::Configured(entry) => entry,
        };

        // Compile outside the lock; racing compiles of the same snapshot
        // produce equivalent features and either may be cached.
        let feature = Arc::new(compile(name, &entry.config)?);

        match self.store.write().cache(name, entry.revision, feature.clone()) {
            Some(cached) => {
                tracing::debug!(feature = name, revision = entry.revision, "Compiled and cached feature");
                Ok(Some(cached))
            }
            None => {
                tracing::debug!(feature = name, "Config changed during compile, result not cached");
                Ok(Some(feature))
            }
        }
    }

    /// Compile every configured feature and report the first failure
    pub fn validate_all(&self) -> Result<usize> {
        let entries = self.store.read().entries();
        for (name, entry) in &entries {
            compile(name, &entry.config)?;
        }
        tracing::debug!("Validated {} feature(s)", entries.len());
        Ok(entries.len())
    }

    /// Whether config exists for `name`
    pub fn contains(&self, name: &str) -> bool {
        self.store.read().contains(name)
    }

    /// Names of all configured features, sorted
    pub fn names(&self) -> Vec<String> {
        self.store.read().names()
    }

    /// Number of configured features
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of features currently held in compiled form
    pub fn compiled_count(&self) -> usize {
        self.store.read().compiled_len()
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }
}

fn compile(name: &str, config: &JsonValue) -> Result<Feature> {
    FeatureParser::parse(name, config).map_err(|source| {
        tracing::warn!(feature = name, error = %source, "Feature config failed to compile");
        SdkError::Compile {
            feature: name.to_string(),
            source,
        }
    })
}

impl FeatureManager for RuleManager {
    fn has(&self, name: &str, context: &RawContext) -> Result<bool> {
        let Some(feature) = self.feature(name)? else {
            tracing::trace!(feature = name, "Unknown feature checked");
            return Ok(false);
        };

        let context = self
            .context_builder
            .build(context)
            .map_err(|source| SdkError::InvalidContext {
                feature: name.to_string(),
                source,
            })?;

        Ok(feature.matches(&context))
    }

    fn insert(&self, name: &str, config: JsonValue) -> Result<()> {
        self.check(name, &config)?;
        self.store.write().insert(name, config);
        tracing::debug!(feature = name, "Stored feature config");
        Ok(())
    }

    fn reset(&self) {
        self.store.write().clear();
        tracing::info!("Feature manager reset");
    }
}

impl fmt::Debug for RuleManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleManager")
            .field("config", &self.config)
            .field("features", &self.names())
            .field("compiled", &self.compiled_count())
            .finish()
    }
}
