//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// PriceAPI token. Required to talk to the live service.
    #[serde(default)]
    pub token: Option<String>,

    /// Marketplace country code sent with job creation
    #[serde(default = "default_country")]
    pub country: String,

    /// Maximum seconds to wait for a job to complete
    #[serde(default = "default_max_wait_secs")]
    pub max_wait_secs: u64,

    /// Pause between status checks in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Lower bound of the plausible price band (inclusive)
    #[serde(default = "default_min_price")]
    pub min_price: f64,

    /// Upper bound of the plausible price band (inclusive)
    #[serde(default = "default_max_price")]
    pub max_price: f64,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_country() -> String {
    "us".to_string()
}

fn default_max_wait_secs() -> u64 {
    30
}

fn default_poll_interval_ms() -> u64 {
    2000
}

fn default_min_price() -> f64 {
    10.0
}

fn default_max_price() -> f64 {
    10000.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            country: default_country(),
            max_wait_secs: default_max_wait_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            min_price: default_min_price(),
            max_price: default_max_price(),
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("price-scout").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(token) = std::env::var("PRICE_SCOUT_TOKEN") {
            self.token = Some(token);
        }

        if let Ok(country) = std::env::var("PRICE_SCOUT_COUNTRY") {
            self.country = country;
        }

        if let Ok(max_wait) = std::env::var("PRICE_SCOUT_MAX_WAIT") {
            if let Ok(secs) = max_wait.parse() {
                self.max_wait_secs = secs;
            }
        }

        self
    }
}

/// Output format for the price report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
