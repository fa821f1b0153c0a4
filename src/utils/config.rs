//! Configuration management for vidplayer
//!
//! This module handles loading and managing application configuration
//! from config files and environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::utils::error::{IntoPlayerError, PlayerError, Result};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Video catalog configuration
    pub library: LibraryConfig,

    /// General application settings
    pub general: GeneralConfig,
}

/// Video catalog configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Catalog file to load; the bundled catalog is used when unset
    pub path: Option<PathBuf>,
}

/// General application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Seed for random playback; a fresh thread RNG is used when unset
    pub random_seed: Option<u64>,

    /// Prompt printed before each interactive command
    pub prompt: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            random_seed: None,
            prompt: "VP> ".to_string(),
        }
    }
}

/// Keys set by a single config file; anything absent keeps its earlier value
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    library: LibraryLayer,
    general: GeneralLayer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LibraryLayer {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GeneralLayer {
    log_level: Option<String>,
    random_seed: Option<u64>,
    prompt: Option<String>,
}

impl Config {
    /// Load configuration from various sources
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. Default values
    /// 2. System config file (/etc/vidplayer/config.toml on Linux)
    /// 3. User config file (~/.config/vidplayer/config.toml on Linux)
    /// 4. The explicitly requested file, if any
    /// 5. Environment variables (VIDPLAYER_* prefix)
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(system_path) = Self::system_config_path() {
            if system_path.exists() {
                config.merge_from_file(&system_path)?;
            }
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                config.merge_from_file(&user_path)?;
            }
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(PlayerError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            config.merge_from_file(path)?;
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to user config file
    pub fn save(&self) -> Result<()> {
        let path = Self::user_config_path()
            .ok_or_else(|| PlayerError::Config("Cannot determine user config path".to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).config_err("Failed to create config directory")?;
        }

        let toml = toml::to_string_pretty(self).config_err("Failed to serialize config")?;
        std::fs::write(&path, toml).config_err("Failed to write config file")?;

        Ok(())
    }

    /// Overlay the keys set in a TOML file onto the current values
    pub(crate) fn merge_from_file(&mut self, path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path).config_err("Failed to read config file")?;
        let layer: ConfigLayer =
            toml::from_str(&contents).config_err("Failed to parse config file")?;

        self.apply_layer(layer);

        Ok(())
    }

    fn apply_layer(&mut self, layer: ConfigLayer) {
        if let Some(path) = layer.library.path {
            self.library.path = Some(path);
        }

        let general = layer.general;
        if let Some(log_level) = general.log_level {
            self.general.log_level = log_level;
        }
        if let Some(seed) = general.random_seed {
            self.general.random_seed = Some(seed);
        }
        if let Some(prompt) = general.prompt {
            self.general.prompt = prompt;
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(path) = std::env::var("VIDPLAYER_LIBRARY_PATH") {
            self.library.path = Some(PathBuf::from(path));
        }

        if let Ok(log_level) = std::env::var("VIDPLAYER_LOG_LEVEL") {
            self.general.log_level = log_level;
        }

        if let Ok(seed) = std::env::var("VIDPLAYER_RANDOM_SEED") {
            self.general.random_seed = Some(
                seed.parse()
                    .map_err(|_| PlayerError::Config("Invalid VIDPLAYER_RANDOM_SEED".to_string()))?,
            );
        }

        Ok(())
    }

    /// Validate configuration values
    pub(crate) fn validate(&self) -> Result<()> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.general.log_level.as_str()) {
            return Err(PlayerError::Config(format!(
                "Invalid log level '{}', must be one of: {:?}",
                self.general.log_level,
                valid_log_levels
            )));
        }

        if let Some(path) = &self.library.path {
            if path.as_os_str().is_empty() {
                return Err(PlayerError::Config("Library path must not be empty".to_string()));
            }
        }

        Ok(())
    }

    /// Get system config file path
    fn system_config_path() -> Option<PathBuf> {
        #[cfg(target_os = "linux")]
        return Some(PathBuf::from("/etc/vidplayer/config.toml"));

        #[cfg(target_os = "windows")]
        return std::env::var("PROGRAMDATA").ok()
            .map(|p| PathBuf::from(p).join("vidplayer").join("config.toml"));

        #[cfg(target_os = "macos")]
        return Some(PathBuf::from("/Library/Application Support/vidplayer/config.toml"));

        #[allow(unreachable_code)]
        None
    }

    /// Get user config file path
    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vidplayer").join("config.toml"))
    }
}
