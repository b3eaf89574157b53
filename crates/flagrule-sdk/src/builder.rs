//! Builder pattern for RuleManager

use crate::config::ManagerConfig;
use crate::context_builder::{ContextBuilder, IdentityContextBuilder};
use crate::error::Result;
use crate::manager::FeatureManager;
use crate::rule_manager::RuleManager;
use flagrule_parser::DocumentFormat;
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use std::sync::Arc;

/// Builder for RuleManager
///
/// # Example
///
/// ```rust,ignore
/// use flagrule_sdk::{DocumentFormat, RuleManagerBuilder};
///
/// let manager = RuleManagerBuilder::new()
///     .with_context_builder(|raw: &RawContext| project_user(raw))
///     .with_document_file("config/flags.yaml")
///     .validate_on_add(true)
///     .build()?;
/// ```
pub struct RuleManagerBuilder {
    config: ManagerConfig,
    context_builder: Option<Arc<dyn ContextBuilder>>,
    features: Vec<(String, JsonValue)>,
    document_contents: Vec<(String, DocumentFormat)>,
    document_files: Vec<PathBuf>,
}

impl RuleManagerBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: ManagerConfig::new(),
            context_builder: None,
            features: Vec::new(),
            document_contents: Vec::new(),
            document_files: Vec::new(),
        }
    }

    /// Set the context builder; defaults to [`IdentityContextBuilder`]
    pub fn with_context_builder(mut self, builder: impl ContextBuilder + 'static) -> Self {
        self.context_builder = Some(Arc::new(builder));
        self
    }

    /// Set manager configuration
    pub fn with_config(mut self, config: ManagerConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a single feature config
    pub fn with_feature(mut self, name: impl Into<String>, config: JsonValue) -> Self {
        self.features.push((name.into(), config));
        self
    }

    /// Add flag document content directly (alternative to a file path)
    pub fn with_document_content(mut self, content: impl Into<String>, format: DocumentFormat) -> Self {
        self.document_contents.push((content.into(), format));
        self
    }

    /// Add a flag document file
    pub fn with_document_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.document_files.push(path.into());
        self
    }

    /// Enable eager validation on add
    pub fn validate_on_add(mut self, enable: bool) -> Self {
        self.config.validate_on_add = enable;
        self
    }

    /// Build the manager
    ///
    /// Documents are loaded first (files, then inline content), then
    /// individual features, so later sources override earlier ones.
    pub fn build(self) -> Result<RuleManager> {
        let context_builder: Arc<dyn ContextBuilder> = match self.context_builder {
            Some(builder) => builder,
            None => Arc::new(IdentityContextBuilder),
        };
        let manager = RuleManager::from_parts(context_builder, self.config);

        for path in &self.document_files {
            manager.load_file(path)?;
        }
        for (content, format) in &self.document_contents {
            manager.load_document(content, *format)?;
        }
        for (name, config) in self.features {
            manager.insert(&name, config)?;
        }

        tracing::debug!("Built rule manager with {} feature(s)", manager.len());
        Ok(manager)
    }
}

impl Default for RuleManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
