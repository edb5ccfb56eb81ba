// src/config.rs

//! Application configuration structures.
//!
//! One `Config` is built at startup and threaded through the pipeline;
//! components never read ambient environment state themselves.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input and output file locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Webhook notification settings
    #[serde(default)]
    pub notify: NotifyConfig,

    /// Region key aliases for garbled/legacy identifiers
    #[serde(default = "defaults::aliases")]
    pub aliases: Vec<RegionAlias>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.paths.index.trim().is_empty() {
            return Err(AppError::config("paths.index is empty"));
        }
        if self.paths.readme.trim().is_empty() {
            return Err(AppError::config("paths.readme is empty"));
        }
        if self.paths.accounts_dir.trim().is_empty() {
            return Err(AppError::config("paths.accounts_dir is empty"));
        }
        if self.notify.timeout_secs == 0 {
            return Err(AppError::config("notify.timeout_secs must be > 0"));
        }
        if self.notify.trimmed_field_count == 0 {
            return Err(AppError::config("notify.trimmed_field_count must be > 0"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            notify: NotifyConfig::default(),
            aliases: defaults::aliases(),
        }
    }
}

/// Input and output file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Global snapshot index
    #[serde(default = "defaults::index_path")]
    pub index: String,

    /// Static server metadata
    #[serde(default = "defaults::servers_path")]
    pub servers: String,

    /// Root directory holding one folder per region
    #[serde(default = "defaults::accounts_dir")]
    pub accounts_dir: String,

    /// Rendered report target (overwritten each run)
    #[serde(default = "defaults::readme_path")]
    pub readme: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            index: defaults::index_path(),
            servers: defaults::servers_path(),
            accounts_dir: defaults::accounts_dir(),
            readme: defaults::readme_path(),
        }
    }
}

/// Webhook notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Webhook endpoint; notification is skipped when unset
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Username the webhook posts under
    #[serde(default = "defaults::bot_name")]
    pub bot_name: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Total field character budget before the field list is trimmed
    #[serde(default = "defaults::max_embed_chars")]
    pub max_embed_chars: usize,

    /// Fields kept when the budget is exceeded
    #[serde(default = "defaults::trimmed_field_count")]
    pub trimmed_field_count: usize,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            bot_name: defaults::bot_name(),
            timeout_secs: defaults::timeout(),
            max_embed_chars: defaults::max_embed_chars(),
            trimmed_field_count: defaults::trimmed_field_count(),
        }
    }
}

/// Mapping from a legacy/garbled region key to its on-disk folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionAlias {
    /// Key as it appears in the index
    pub key: String,

    /// Folder name under the accounts root
    pub folder: String,
}

mod defaults {
    use super::RegionAlias;

    // Path defaults
    pub fn index_path() -> String {
        "index.json".into()
    }
    pub fn servers_path() -> String {
        "servers/servers.json".into()
    }
    pub fn accounts_dir() -> String {
        "accounts".into()
    }
    pub fn readme_path() -> String {
        "README.md".into()
    }

    // Notify defaults
    pub fn bot_name() -> String {
        "Tower of Fantasy | Game Manager".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn max_embed_chars() -> usize {
        6000
    }
    pub fn trimmed_field_count() -> usize {
        5
    }

    // Known legacy keys the collector emitted before region keys were
    // normalized; extend via config.toml when new variants show up.
    pub fn aliases() -> Vec<RegionAlias> {
        [
            ("ap", "asia_pacific"),
            ("eu", "europe"),
            ("na", "north_america"),
            ("sa", "south_america"),
            ("sea", "southeast_asia"),
        ]
        .into_iter()
        .map(|(key, folder)| RegionAlias {
            key: key.to_string(),
            folder: folder.to_string(),
        })
        .collect()
    }
}
