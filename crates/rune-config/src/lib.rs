//! Rune transitions configuration
//!
//! Loads page transition settings from `rune.toml`, with environment variables
//! taking precedence over file values.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default file name looked up by [`RuneConfig::load_or_default`].
pub const CONFIG_FILE: &str = "rune.toml";

/// Locator reserved for destinations outside the application.
pub const DEFAULT_EXTERNAL_LOCATOR: &str = "app://external/";

/// Errors raised while loading `rune.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    /// The file is not valid TOML for [`RuneConfig`].
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RuneConfig {
    /// Page transition settings
    pub transitions: TransitionsConfig,
    /// Log output settings
    pub logging: LoggingConfig,
}

/// Page transition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionsConfig {
    /// Whether newly created pages start with animated transitions enabled
    pub enabled: bool,
    /// Locator that marks a navigation leaving the application
    pub external_locator: String,
    /// Timing of the built-in turnstile effects
    pub turnstile: TurnstileConfig,
}

/// Built-in turnstile effect timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnstileConfig {
    /// Duration of every turnstile effect in milliseconds
    pub duration_ms: f32,
    /// Easing curve name (linear, ease_in, ease_out, ease_in_out, exponential_out)
    pub easing: String,
    /// Exponent used by the exponential curve
    pub exponent: f32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive handed to the log backend when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for TransitionsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            external_locator: DEFAULT_EXTERNAL_LOCATOR.to_string(),
            turnstile: TurnstileConfig::default(),
        }
    }
}

impl Default for TurnstileConfig {
    fn default() -> Self {
        Self {
            duration_ms: 350.0,
            easing: "exponential_out".to_string(),
            exponent: 6.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

fn parse_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl RuneConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from `rune.toml` in the current directory,
    /// or return the defaults if it is missing or invalid
    pub fn load_or_default() -> Self {
        Self::load_from_file(CONFIG_FILE).unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        self.merge_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// `merge_with_env` routes through here; tests pass a map instead of
    /// mutating the process environment.
    pub fn merge_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("RUNE_TRANSITIONS_ENABLED") {
            self.transitions.enabled = parse_flag(&val);
        }
        if let Some(val) = lookup("RUNE_TRANSITION_DURATION_MS") {
            if let Ok(ms) = val.parse::<f32>() {
                if ms >= 0.0 {
                    self.transitions.turnstile.duration_ms = ms;
                }
            }
        }
        if let Some(locator) = lookup("RUNE_EXTERNAL_LOCATOR") {
            if !locator.trim().is_empty() {
                self.transitions.external_locator = locator;
            }
        }
        if let Some(filter) = lookup("RUNE_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from rune.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
