use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Application configuration module
/// This module handles the service configuration including loading from an
/// optional JSON file, environment overrides and validation.
/// Represents the service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Generation provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Batch resource limits
    #[serde(default)]
    pub batch: BatchConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Generation provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Model name (e.g., "gpt-4o-mini")
    #[serde(default = "default_model")]
    pub model: String,

    /// API key for the service
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service endpoint URL (optional, for self-hosted or compatible servers)
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_provider_timeout_secs")]
    pub timeout_secs: u64,

    /// Cap on generated tokens per batch call
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: String::new(),
            endpoint: String::new(),
            timeout_secs: default_provider_timeout_secs(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

impl ProviderConfig {
    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Batch resource limits
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BatchConfig {
    /// Maximum items processed per batch
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Wall-clock budget per batch in seconds
    #[serde(default = "default_time_budget_secs")]
    pub time_budget_secs: u64,

    /// Per-page connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Per-page read timeout in seconds
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,

    /// Cap on body bytes read per page
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
            time_budget_secs: default_time_budget_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl BatchConfig {
    /// The budget object driving bounded iteration
    pub fn budget(&self) -> crate::batch::BatchBudget {
        crate::batch::BatchBudget {
            max_items: self.max_items,
            time_budget: Duration::from_secs(self.time_budget_secs),
        }
    }

    /// Per-page connect timeout as a Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Per-page read timeout as a Duration
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

/// Log level setting
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's level filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_provider_timeout_secs() -> u64 {
    60
}

fn default_max_output_tokens() -> u32 {
    1400
}

fn default_max_items() -> usize {
    100
}

fn default_time_budget_secs() -> u64 {
    20
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_read_timeout_secs() -> u64 {
    8
}

fn default_max_body_bytes() -> usize {
    400_000
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_address: default_bind_address(),
            provider: ProviderConfig::default(),
            batch: BatchConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, or defaults if the file is absent
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        } else {
            Config::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment-variable overrides on top of file values
    fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            if !api_key.is_empty() {
                self.provider.api_key = api_key;
            }
        }
        if let Ok(model) = std::env::var("MEDREVIEWS_MODEL") {
            if !model.is_empty() {
                self.provider.model = model;
            }
        }
        if let Ok(endpoint) = std::env::var("MEDREVIEWS_ENDPOINT") {
            if !endpoint.is_empty() {
                self.provider.endpoint = endpoint;
            }
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.provider.api_key.is_empty() {
            return Err(anyhow!("Provider API key is required (set OPENAI_API_KEY)"));
        }
        if self.batch.max_items == 0 {
            return Err(anyhow!("batch.max_items must be greater than zero"));
        }
        if self.batch.max_body_bytes == 0 {
            return Err(anyhow!("batch.max_body_bytes must be greater than zero"));
        }
        Ok(())
    }
}
