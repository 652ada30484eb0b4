use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Tuning for the search-as-you-type debouncer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a search is sent.
    #[serde(default = "default_quiet_period_ms")]
    pub quiet_period_ms: u64,

    /// Queries shorter than this (in chars) never reach the network.
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    /// Drop responses that belong to an input older than the latest one.
    #[serde(default)]
    pub discard_stale: bool,
}

impl SearchConfig {
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: default_quiet_period_ms(),
            min_query_len: default_min_query_len(),
            discard_stale: false,
        }
    }
}

/// Top-level configuration read from disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_city = "Pune"
///
/// [search]
/// quiet_period_ms = 250
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Only search results from this country are kept.
    #[serde(default = "default_target_country")]
    pub target_country: String,

    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,

    /// City shown before the user picks one.
    #[serde(default = "default_city")]
    pub default_city: String,

    #[serde(default)]
    pub search: SearchConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_target_country() -> String {
    "India".to_string()
}

const fn default_forecast_days() -> u8 {
    7
}

fn default_city() -> String {
    "Delhi".to_string()
}

const fn default_quiet_period_ms() -> u64 {
    300
}

const fn default_min_query_len() -> usize {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            target_country: default_target_country(),
            forecast_days: default_forecast_days(),
            default_city: default_city(),
            search: SearchConfig::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid SkyCast configuration")
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the API key, or an error with a hint on where to put it.
    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => {
                let hint = Self::config_file_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "config.toml".to_string());
                Err(anyhow!(
                    "No weatherapi.com API key configured.\n\
                     Hint: pass `--api-key <KEY>` or set `api_key` in {hint}."
                ))
            }
        }
    }

    /// Override the API key, e.g. from a command-line flag.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if api_key.is_some() {
            self.api_key = api_key;
        }
        self
    }
}
