//! Application configuration for crdctl

use crate::api::Strategy;
use crate::client::DEFAULT_API_PATH;
use crate::error::{CrdError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration stored in ~/.crdctl/config.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Client variant used when `--strategy` is not given
    #[serde(default)]
    pub default_strategy: Strategy,

    /// Namespace used when `-n` is not given; the kubeconfig context's otherwise
    #[serde(default)]
    pub default_namespace: Option<String>,

    /// Deadline for a single create/get, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Prefix for named API groups
    #[serde(default = "default_api_path")]
    pub api_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_strategy: Strategy::default(),
            default_namespace: None,
            request_timeout_secs: default_request_timeout(),
            api_path: default_api_path(),
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_request_timeout() -> u64 {
    30
}

fn default_api_path() -> String {
    DEFAULT_API_PATH.to_string()
}

/// Get the crdctl config directory (~/.crdctl)
pub fn config_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|h| h.join(".crdctl"))
        .ok_or_else(|| CrdError::Config("Could not determine home directory".to_string()))
}

/// Load application config from ~/.crdctl/config.toml
pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_dir()?.join("config.toml"))
}

/// Load application config from `path`, falling back to defaults when it does not exist
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| CrdError::Config(format!("{}: {e}", path.display())))
    } else {
        Ok(AppConfig::default())
    }
}
