//! Flag document parser
//!
//! A flag document is a top-level mapping of feature names to feature
//! definitions (rule engine) or to booleans (simple flags), written in
//! YAML or JSON.

use crate::error::{ParseError, Result};
use flagrule_core::types::json_type_name;
use serde_json::Value as JsonValue;
use std::path::Path;

/// Text format of a flag document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Guess the format from a file extension; anything but `.json` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

/// Flag document parser
pub struct DocumentParser;

impl DocumentParser {
    /// Parse document text into a JSON value
    pub fn parse(content: &str, format: DocumentFormat) -> Result<JsonValue> {
        let value = match format {
            DocumentFormat::Yaml if content.trim().is_empty() => JsonValue::Null,
            DocumentFormat::Yaml => serde_yaml::from_str(content)?,
            DocumentFormat::Json => serde_json::from_str(content)?,
        };
        Ok(value)
    }

    /// Parse a rule-engine document into `(name, feature config)` entries
    ///
    /// Entries are only shape-checked here; segments and conditions are
    /// compiled later, when a feature is first used.
    pub fn parse_features(content: &str, format: DocumentFormat) -> Result<Vec<(String, JsonValue)>> {
        let entries = Self::into_entries(Self::parse(content, format)?)?;

        for (name, config) in &entries {
            if !config.is_object() {
                return Err(ParseError::invalid_value(
                    name,
                    format!("feature config must be a mapping, got {}", json_type_name(config)),
                ));
            }
        }

        log::debug!("parsed flag document with {} feature(s)", entries.len());
        Ok(entries)
    }

    /// Parse a boolean document into `(name, enabled)` entries
    pub fn parse_booleans(content: &str, format: DocumentFormat) -> Result<Vec<(String, bool)>> {
        Self::into_entries(Self::parse(content, format)?)?
            .into_iter()
            .map(|(name, value)| match value {
                JsonValue::Bool(enabled) => Ok((name, enabled)),
                other => Err(ParseError::invalid_value(
                    &name,
                    format!("flag values must be true/false, got {}", json_type_name(&other)),
                )),
            })
            .collect()
    }

    fn into_entries(document: JsonValue) -> Result<Vec<(String, JsonValue)>> {
        match document {
            JsonValue::Object(map) => Ok(map.into_iter().collect()),
            // An empty YAML document
            JsonValue::Null => Ok(Vec::new()),
            other => Err(ParseError::InvalidDocument(format!(
                "expected a mapping of flag names, got {}",
                json_type_name(&other)
            ))),
        }
    }
}
