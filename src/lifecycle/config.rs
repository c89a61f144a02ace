//! Configuration loading.
//!
//! Every section has defaults that reproduce the extension's behaviour, so an
//! empty YAML document (or no file at all) is a valid configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabemapConfig {
    pub search: SearchConfig,
    pub http: HttpConfig,
    pub channel: ChannelConfig,
    pub tracker: TrackerConfig,
    pub diagnostics: DiagnosticsConfig,
}

/// Where the ratings site's search endpoint lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub base_url: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://tabelog.com/rstLst/".to_string(),
        }
    }
}

/// HTTP fetcher settings. No timeout unless one is configured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_ms: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Capacity of each context's mailbox.
    pub buffer_size: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self { buffer_size: 32 }
    }
}

/// What the place tracker treats as "not a place" and how it finds the phone number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub ignored_titles: Vec<String>,
    pub phone_label_prefixes: Vec<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            ignored_titles: vec![
                "Results".to_string(),
                "Google Maps".to_string(),
                "Tabemap".to_string(),
            ],
            phone_label_prefixes: vec!["Phone:".to_string(), "電話:".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Mirror background step logs to the presentation context as `DEBUG_LOG` messages.
    pub relay: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self { relay: true }
    }
}

/// Load configuration from a YAML file.
pub fn load_config(path: &Path) -> Result<TabemapConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from YAML text.
pub fn parse_config(content: &str) -> Result<TabemapConfig, ConfigError> {
    let config: TabemapConfig = if content.trim().is_empty() {
        TabemapConfig::default()
    } else {
        serde_yaml::from_str(content)?
    };
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &TabemapConfig) -> Result<(), ConfigError> {
    let base = config.search.base_url.trim();
    if base.is_empty() {
        return Err(ConfigError::Invalid(
            "search.base_url must not be empty".to_string(),
        ));
    }
    if !base.ends_with('/') {
        return Err(ConfigError::Invalid(
            "search.base_url must end with '/'".to_string(),
        ));
    }

    if config.channel.buffer_size == 0 {
        return Err(ConfigError::Invalid(
            "channel.buffer_size must be > 0".to_string(),
        ));
    }

    if config.http.timeout_ms == Some(0) {
        return Err(ConfigError::Invalid(
            "http.timeout_ms must be > 0 when set".to_string(),
        ));
    }

    if config.tracker.phone_label_prefixes.is_empty() {
        return Err(ConfigError::Invalid(
            "tracker.phone_label_prefixes must not be empty".to_string(),
        ));
    }
    if config
        .tracker
        .phone_label_prefixes
        .iter()
        .any(|p| p.trim().is_empty())
    {
        return Err(ConfigError::Invalid(
            "tracker.phone_label_prefixes must not contain blank entries".to_string(),
        ));
    }

    Ok(())
}
