//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - Environment variables (`SAFEVAL_CONFIG` selects the file)
//!
//! The `settings` section is handed to `safeval-core` as the context every
//! evaluated value is created with.

use crate::cli::EncodeMode;
use crate::error::{Error, Result};
use safeval_core::Settings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name used for project configuration
pub const PROJECT_CONFIG_FILE: &str = ".safeval.yaml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Formatting and coercion settings for evaluated values
    pub settings: Settings,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingSection,

    /// Named step chains usable with `eval --preset`
    pub presets: BTreeMap<String, Vec<String>>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Use colored output by default
    pub color: bool,

    /// Encoder used by `eval` when `--encode` is not given
    pub encode: EncodeMode,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level used when no `-v` flag is given
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            encode: EncodeMode::Html,
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("json")
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        if !is_yaml(path) && !is_json(path) {
            return Err(Error::InvalidFormat {
                path: path.to_path_buf(),
                expected: "YAML or JSON".to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;

        let config = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in &Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        // Logging is not initialized yet
                        eprintln!("Warning: Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        // Return default config if no config file found
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check, in priority order
    pub fn default_config_paths() -> Vec<PathBuf> {
        // Current directory
        let mut paths = vec![
            PathBuf::from(PROJECT_CONFIG_FILE),
            PathBuf::from(".safeval.json"),
        ];

        // User config directory
        if let Some(path) = Self::user_config_path() {
            paths.push(path);
        }
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("safeval").join("config.json"));
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".safeval.yaml"));
            paths.push(home_dir.join(".safeval.json"));
        }

        paths
    }

    /// Location of the user configuration file
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("safeval").join("config.yaml"))
    }

    /// Steps of a named preset
    pub fn preset(&self, name: &str) -> Result<&[String]> {
        self.presets
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::PresetNotFound {
                name: name.to_string(),
            })
    }

    /// Settings for new values.
    ///
    /// Settings that fail validation are reported and replaced by the
    /// defaults.
    pub fn settings_handle(&self) -> Arc<Settings> {
        match self.settings.validate() {
            Ok(()) => Arc::new(self.settings.clone()),
            Err(e) => {
                tracing::warn!(error = %e, "Rejected configured settings, using defaults");
                Settings::shared_default()
            }
        }
    }

    /// Check the settings and every preset
    pub fn validate(&self) -> Result<()> {
        self.settings.validate()?;
        for (name, steps) in &self.presets {
            safeval_core::Chain::parse(steps)
                .map_err(|e| Error::config(format!("preset '{}': {}", name, e)))?;
        }
        Ok(())
    }

    /// Serialize in the format implied by the file extension
    pub fn to_string_for(&self, path: &Path) -> Result<String> {
        if is_yaml(path) {
            Ok(serde_yaml::to_string(self)?)
        } else {
            Ok(serde_json::to_string_pretty(self)?)
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_string_for(path)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Builder for creating configurations programmatically
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new config builder
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Replace the value settings
    pub fn settings(mut self, settings: Settings) -> Self {
        self.config.settings = settings;
        self
    }

    /// Set the default encoder
    pub fn encode(mut self, encode: EncodeMode) -> Self {
        self.config.output.encode = encode;
        self
    }

    /// Add a named preset
    pub fn preset<I, S>(mut self, name: impl Into<String>, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .presets
            .insert(name.into(), steps.into_iter().map(Into::into).collect());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use safeval_core::SettingsBuilder;
    use tempfile::TempDir;

    fn sample() -> Config {
        ConfigBuilder::new()
            .settings(SettingsBuilder::new().separators(",", ".").build().unwrap())
            .encode(EncodeMode::Raw)
            .preset("title", ["text-only", "max-chars:40", "or:(untitled)"])
            .build()
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = sample();
        config.save(&path).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_json_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let config = sample();
        config.save(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.trim_start().starts_with('{'));
        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "settings:\n  null_as_zero: true\npresets:\n  price:\n    - \"number-format:2\"\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(config.settings.null_as_zero);
        assert_eq!(config.settings.decimal_separator, ".");
        assert_eq!(config.output, OutputConfig::default());
        assert_eq!(config.preset("price").unwrap(), ["number-format:2".to_string()]);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::from_file(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::from_file(&path), Err(Error::Json(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[settings]").unwrap();
        assert!(matches!(Config::from_file(&path), Err(Error::InvalidFormat { .. })));
    }

    #[test]
    fn test_unknown_preset() {
        let err = sample().preset("nope").unwrap_err();
        assert!(matches!(err, Error::PresetNotFound { ref name } if name == "nope"));
    }

    #[test]
    fn test_rejected_settings_fall_back_to_defaults() {
        let mut config = Config::default();
        config.settings.decimal_separator = ",".to_string();
        config.settings.thousands_separator = ",".to_string();

        assert!(config.validate().is_err());
        assert_eq!(*config.settings_handle(), Settings::default());
    }

    #[test]
    fn test_validate_checks_presets() {
        let config = ConfigBuilder::new().preset("bad", ["no-such-step"]).build();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_default_paths_start_in_project() {
        let paths = Config::default_config_paths();
        assert_eq!(paths[0], PathBuf::from(".safeval.yaml"));
        assert_eq!(paths[1], PathBuf::from(".safeval.json"));
    }
}
