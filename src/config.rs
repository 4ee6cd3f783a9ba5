//! Runtime configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `BOOK_CAPACITY`: orders to pre-allocate (default 1024)
//! - `BOOK_SEED_DEMO`: replay the demo orders at startup (default true)
//! - `LOG_LEVEL`: default log level, used when `RUST_LOG` is unset (default `warn`)
//! - `LOG_FORMAT`: `compact` (default) or `pretty`

use std::env;

use thiserror::Error;

/// Default number of pre-allocated order slots
pub const DEFAULT_CAPACITY: usize = 1024;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single-line output
    #[default]
    Compact,
    /// Multi-line human-readable output
    Pretty,
}

impl LogFormat {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Some(LogFormat::Compact),
            "pretty" => Some(LogFormat::Pretty),
            _ => None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Default log level filter
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Pre-allocated order slots
    pub capacity: usize,
    /// Replay the demo orders before the menu starts
    pub seed_demo: bool,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            seed_demo: true,
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Create config from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup
    ///
    /// Unset keys keep their defaults; set keys must parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("BOOK_CAPACITY") {
            config.capacity = value.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "BOOK_CAPACITY",
                value,
            })?;
        }
        if let Some(value) = lookup("BOOK_SEED_DEMO") {
            config.seed_demo = parse_bool(&value).ok_or(ConfigError::Invalid {
                key: "BOOK_SEED_DEMO",
                value,
            })?;
        }
        if let Some(value) = lookup("LOG_LEVEL") {
            config.log.level = value;
        }
        if let Some(value) = lookup("LOG_FORMAT") {
            config.log.format = LogFormat::parse(&value).ok_or(ConfigError::Invalid {
                key: "LOG_FORMAT",
                value,
            })?;
        }

        Ok(config)
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
