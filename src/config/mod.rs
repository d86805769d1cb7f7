//! Configuration system for propath.
//!
//! This module provides the configuration structure for propath with sensible defaults
//! and support for serialization/deserialization via serde. Configuration is loaded
//! from a TOML file and can be overridden by command-line arguments.
//!
//! # Example
//!
//! ```
//! use propath::config::Config;
//!
//! let config = Config::default();
//! assert!(!config.boolean_getters);
//! assert_eq!(config.log_level, "warn");
//!
//! let custom = Config {
//!     boolean_getters: true,
//!     ..Config::default()
//! };
//! assert!(custom.resolver_options().boolean_getters);
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::expression::ResolverOptions;

/// Configuration for the propath command line tool.
///
/// # Fields
///
/// * `boolean_getters` - Treat `isX` methods as getters for `x` (default: false)
/// * `log_level` - Log filter used when `RUST_LOG` is not set (default: "warn")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Treat `isX` methods as getters
    #[serde(default)]
    pub boolean_getters: bool,

    /// Log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Returns the default log level.
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            boolean_getters: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/propath/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("propath");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if there is no home directory or no
    /// config file, and an error if the file exists but can't be read or parsed.
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_or_default(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from `path`, or the defaults when it doesn't exist.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Loads configuration from an explicit file, reporting any error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to an explicit file.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Resolver options derived from this configuration.
    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            boolean_getters: self.boolean_getters,
        }
    }
}
