//! Configuration types for term-lint.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration, usually read from `term-lint.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Module paths to scan (e.g. `crate::domain`).
    #[serde(default)]
    pub namespaces: Vec<String>,

    /// Forbidden terms; normalized when the rule is built.
    #[serde(default)]
    pub terms: Vec<String>,

    /// Source discovery configuration.
    #[serde(default)]
    pub source: SourceConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// Where and how declared types are read from source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Source root, relative to the manifest directory (default: `src`).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns of files to skip.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether `#[cfg(test)]` modules and test files are scanned.
    #[serde(default)]
    pub include_tests: bool,

    /// Qualified names exempt from checking (`crate::m::Type` or
    /// `crate::m::Type::member`).
    #[serde(default)]
    pub exempt: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: Vec::new(),
            include_tests: false,
            exempt: Vec::new(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("src")
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config from {path}: {source}")]
    Io {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// TOML parse error.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Error message.
        message: String,
    },
}
