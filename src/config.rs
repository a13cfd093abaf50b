// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file support for mamma
//!
//! Loads configuration from .mammarc.toml in current directory or ~/.config/mamma/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::advisory::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use crate::dataset::DatasetPaths;
use crate::dataset::loader::{DEFAULT_FOODS_FILE, DEFAULT_SYNONYMS_FILE};

/// Project-local config file name
pub const LOCAL_CONFIG_FILE: &str = ".mammarc.toml";

const DEFAULT_MAX_RESULTS: usize = 10;
const DEFAULT_LOG_DELAY_MS: u64 = 400;
const DEFAULT_ADVISORY_DELAY_MS: u64 = 500;

/// Output format for results (mirrored from cli for library use)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigOutputFormat {
    #[default]
    Text,
    Json,
}

/// `[advisory]` section
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    /// Fallback advisory endpoint URL
    pub endpoint: Option<String>,
    /// Request timeout in milliseconds
    pub timeout_ms: Option<u64>,
}

/// `[debounce]` section
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Quiet period before a search term is logged
    pub log_delay_ms: Option<u64>,
    /// Quiet period before the advisory is offered
    pub advisory_delay_ms: Option<u64>,
}

/// Configuration loaded from .mammarc.toml or ~/.config/mamma/config.toml
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Food table CSV
    pub foods_path: Option<PathBuf>,
    /// Synonym table CSV
    pub synonyms_path: Option<PathBuf>,
    /// Maximum number of results to return
    pub max_results: Option<usize>,
    /// Default output format (text or json)
    pub default_format: Option<String>,
    pub advisory: AdvisoryConfig,
    pub debounce: DebounceConfig,
}

impl Config {
    /// Load configuration from files
    ///
    /// Precedence (highest to lowest):
    /// 1. .mammarc.toml in current directory
    /// 2. ~/.config/mamma/config.toml
    pub fn load() -> Self {
        if let Some(config) = Self::load_from_path(Path::new(LOCAL_CONFIG_FILE)) {
            return config;
        }

        if let Some(home) = dirs::home_dir() {
            let config_path = home.join(".config").join("mamma").join("config.toml");
            if let Some(config) = Self::load_from_path(&config_path) {
                return config;
            }
        }

        Self::default()
    }

    fn load_from_path(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match Self::parse(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Parse config text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Get output format from config, parsing the string to ConfigOutputFormat
    pub fn output_format(&self) -> Option<ConfigOutputFormat> {
        self.default_format.as_ref().and_then(|s| match s.to_lowercase().as_str() {
            "json" => Some(ConfigOutputFormat::Json),
            "text" => Some(ConfigOutputFormat::Text),
            _ => None,
        })
    }

    /// Merge CLI options with config (CLI wins)
    pub fn merge_max_results(&self, cli_value: Option<usize>) -> usize {
        cli_value
            .or(self.max_results)
            .unwrap_or(DEFAULT_MAX_RESULTS)
    }

    /// Dataset locations; CLI paths win over config, config over defaults
    pub fn dataset_paths(&self, foods: Option<PathBuf>, synonyms: Option<PathBuf>) -> DatasetPaths {
        DatasetPaths::new(
            foods
                .or_else(|| self.foods_path.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FOODS_FILE)),
            synonyms
                .or_else(|| self.synonyms_path.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SYNONYMS_FILE)),
        )
    }

    pub fn advisory_endpoint(&self) -> &str {
        self.advisory.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn advisory_timeout(&self) -> Duration {
        self.advisory
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn log_delay(&self) -> Duration {
        Duration::from_millis(self.debounce.log_delay_ms.unwrap_or(DEFAULT_LOG_DELAY_MS))
    }

    pub fn advisory_delay(&self) -> Duration {
        Duration::from_millis(
            self.debounce
                .advisory_delay_ms
                .unwrap_or(DEFAULT_ADVISORY_DELAY_MS),
        )
    }
}
