//! App-level configuration.
//!
//! This module handles the `~/.flowtask/config.yaml` file which stores the
//! assistant backend settings. Everything has a safe default: an absent or
//! empty config selects the offline assistant with no backend.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// App configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// URL of the remote assistant backend. Empty means not configured.
    #[serde(default)]
    pub backend_url: String,

    /// Route assisted creation through the offline stub instead of HTTP.
    #[serde(default = "default_use_offline")]
    pub use_offline_assistant: bool,

    /// Optional bearer token passed to the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

const fn default_use_offline() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: String::new(),
            use_offline_assistant: true,
            session_token: None,
        }
    }
}

impl AppConfig {
    /// Load config from a specific base directory, returning defaults if the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(base_dir: &Path) -> Result<Self> {
        let config_path = base_dir.join(crate::paths::CONFIG_FILENAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to a specific base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, base_dir: &Path) -> Result<()> {
        let config_path = base_dir.join(crate::paths::CONFIG_FILENAME);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Check whether a non-blank backend URL is configured.
    #[must_use]
    pub fn has_backend(&self) -> bool {
        !self.backend_url.trim().is_empty()
    }
}
