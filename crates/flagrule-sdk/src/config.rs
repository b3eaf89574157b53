//! Configuration types for feature managers

use serde::{Deserialize, Serialize};

/// Rule manager configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Compile features when they are added so structural mistakes surface
    /// at configuration time instead of on first use. Compilation results
    /// are still cached lazily.
    #[serde(default)]
    pub validate_on_add: bool,
}

impl ManagerConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable eager validation on add
    pub fn validate_on_add(mut self, enable: bool) -> Self {
        self.validate_on_add = enable;
        self
    }
}
