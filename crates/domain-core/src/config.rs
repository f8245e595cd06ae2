//! Configuration parsing for the skill domain registry.
//!
//! Uses a `key=value` file (default `.skills/config` under the working root).
//! Precedence: CLI flags > `--config` file > `.skills/config` > defaults.

use crate::lang::{LangCode, LangError};
use crate::types::ScanPolicy;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file location relative to the working root.
pub const DEFAULT_CONFIG_PATH: &str = ".skills/config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("invalid config line: {0}")]
    InvalidLine(String),
    #[error("invalid boolean value for {key}: {value}")]
    InvalidBool { key: String, value: String },
    #[error("invalid language code for {key}: {source}")]
    InvalidLang {
        key: String,
        #[source]
        source: LangError,
    },
}

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root holding one directory per domain (default: skills/).
    pub domains_dir: PathBuf,
    /// Shared entity data, one subdirectory per language (default: core/data/).
    pub shared_data_dir: PathBuf,
    /// Join policy for the domain scan (default: fail_fast).
    pub scan_policy: ScanPolicy,
    /// Language used when a caller does not name one (default: en).
    pub default_lang: LangCode,
    /// Skip directories whose name starts with '.' while scanning (default: false).
    pub skip_hidden: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domains_dir: PathBuf::from("skills"),
            shared_data_dir: PathBuf::from("core/data"),
            scan_policy: ScanPolicy::FailFast,
            default_lang: LangCode::default(),
            skip_hidden: false,
        }
    }
}

impl Config {
    /// Load config for a working root.
    ///
    /// An explicit path must exist; otherwise `.skills/config` is used when
    /// present. Relative directories are resolved against `root`.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        match explicit {
            Some(path) => config.load_file(path)?,
            None => {
                let default_path = root.join(DEFAULT_CONFIG_PATH);
                if default_path.is_file() {
                    config.load_file(&default_path)?;
                }
            }
        }
        config.resolve_paths(root);
        Ok(config)
    }

    /// Load and merge values from a config file.
    pub fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path)?;
        self.parse_content(&content)
    }

    /// Parse config content (key=value format).
    fn parse_content(&mut self, content: &str) -> Result<(), ConfigError> {
        for line in content.lines() {
            let trimmed = line.trim();

            // Skip empty lines and comments
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(ConfigError::InvalidLine(line.to_string()));
            };

            let key = key.trim();
            let value = Self::unquote(value.trim());

            self.apply_value(key, &value)?;
        }
        Ok(())
    }

    /// Remove surrounding quotes from a value.
    fn unquote(value: &str) -> String {
        if value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')))
        {
            return value[1..value.len() - 1].to_string();
        }
        value.to_string()
    }

    /// Apply a single config value.
    fn apply_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "domains_dir" => self.domains_dir = PathBuf::from(value),
            "shared_data_dir" => self.shared_data_dir = PathBuf::from(value),
            "scan_policy" => {
                self.scan_policy = match value {
                    "fail_fast" => ScanPolicy::FailFast,
                    "best_effort" => ScanPolicy::BestEffort,
                    _ => {
                        return Err(ConfigError::InvalidLine(format!(
                            "scan_policy must be 'fail_fast' or 'best_effort', got '{value}'"
                        )))
                    }
                }
            }
            "default_lang" => {
                self.default_lang = value.parse().map_err(|source| ConfigError::InvalidLang {
                    key: key.to_string(),
                    source,
                })?;
            }
            "skip_hidden" => self.skip_hidden = Self::parse_bool(key, value)?,
            _ => {
                // Warn but don't fail for unknown keys
                eprintln!("Warning: unknown config key: {key}");
            }
        }
        Ok(())
    }

    fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
        match value.to_lowercase().as_str() {
            "true" | "1" | "yes" | "y" | "on" => Ok(true),
            "false" | "0" | "no" | "n" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidBool {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Resolve relative paths against a working root.
    pub fn resolve_paths(&mut self, root: &Path) {
        if self.domains_dir.is_relative() {
            self.domains_dir = root.join(&self.domains_dir);
        }
        if self.shared_data_dir.is_relative() {
            self.shared_data_dir = root.join(&self.shared_data_dir);
        }
    }
}
