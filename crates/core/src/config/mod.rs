//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (`CACHE_DIR`, `CACHE_DISABLE`, `OUTPUT_FORMAT`)
//! 2. TOML config file (if `ARTICLED_CONFIG_FILE` set)
//! 3. Built-in defaults

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

use crate::Error;

/// Requested shape of the `content` field in the output record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Cleaned article HTML, verbatim from the structural extractor.
    Html,
    /// The same HTML converted to Markdown.
    Markdown,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Markdown => "markdown",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(OutputFormat::Html),
            "markdown" => Ok(OutputFormat::Markdown),
            other => Err(Error::Config(format!(
                "unknown output format {other:?} (expected \"html\" or \"markdown\")"
            ))),
        }
    }
}

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (`CACHE_DIR`, `CACHE_DISABLE`, `OUTPUT_FORMAT`)
/// 2. TOML config file (if `ARTICLED_CONFIG_FILE` set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Cache directory for fetched pages.
    ///
    /// Set via the `CACHE_DIR` environment variable.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Raw `CACHE_DISABLE` value; any non-empty value bypasses the cache
    /// and forces every fetch onto the network.
    #[serde(default)]
    pub cache_disable: Option<String>,

    /// Output format for extracted content, `html` or `markdown`.
    ///
    /// Set via the `OUTPUT_FORMAT` environment variable.
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// User-Agent string sent with HTTP requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum bytes to fetch per request.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of redirects to follow.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("scrape_cache")
}

fn default_output_format() -> String {
    "html".into()
}

fn default_user_agent() -> String {
    // Real Firefox UA; some sites serve stripped-down pages to bot agents.
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/115.0".into()
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_max_redirects() -> usize {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            cache_disable: None,
            output_format: default_output_format(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
            max_redirects: default_max_redirects(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Whether fetched pages should be cached.
    ///
    /// Any non-empty `CACHE_DISABLE` value disables the cache; `0` and
    /// `false` are no exception. Unset or empty leaves caching on.
    pub fn cache_enabled(&self) -> bool {
        !self.cache_disable.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// Parsed output format.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if `output_format` is not `html` or
    /// `markdown`.
    pub fn output_format(&self) -> Result<OutputFormat, Error> {
        self.output_format.parse()
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables `CACHE_DIR`, `CACHE_DISABLE`, `OUTPUT_FORMAT`
    /// 2. TOML file from `ARTICLED_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("ARTICLED_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::raw()
                .only(&["CACHE_DIR", "CACHE_DISABLE", "OUTPUT_FORMAT"])
                .map(|key| key.as_str().to_lowercase().into()),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
