//! Configuration management for localflow.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths, startup validation, and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{AudioConfig, BehaviourConfig, HotkeyConfig, ServerConfig},
};

use crate::config::{
    DEFAULT_AUTO_PASTE, DEFAULT_BASE_URL, DEFAULT_FORMAT_CHORD, DEFAULT_MAX_SESSION_SECS,
    DEFAULT_RAW_CHORD, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SUPPRESS_TRIGGER,
    DEFAULT_TOGGLE_CHORD,
};

use std::{fs, io::Write, panic::Location, path::PathBuf};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Hotkey chord bindings.
    pub hotkeys: HotkeyConfig,
    /// Audio device configuration.
    pub audio: AudioConfig,
    /// Application behaviour settings.
    pub behaviour: BehaviourConfig,
    /// Transcription backend settings.
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    ///
    /// Chord strings are not compiled here; call [`HotkeyConfig::bindings`]
    /// afterwards so a bad chord is reported with the chord text rather
    /// than as a parse failure of the whole file.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).map_err(|e| AppError::Config {
                reason: format!("Failed to read config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let config: Config = toml::from_str(&contents).map_err(|e| AppError::Config {
                reason: format!("Failed to parse config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            info!(config_path = ?config_path, "Configuration loaded");

            Ok(config)
        } else {
            info!("No config found, creating default");
            Self::create_default()
        }
    }

    /// Save configuration to disk using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_path()?;

        let contents = toml::to_string_pretty(self).map_err(|e| AppError::Config {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // Atomic write: write to temp file then rename
        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::Config {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::Config {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::Config {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, &config_path).map_err(|e| AppError::Config {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("com", "localflow", "LocalFlow").ok_or_else(|| AppError::Config {
                reason: "Failed to get config directory".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn create_default() -> AppResult<Self> {
        let config = Config::default();
        config.save()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            hotkeys: HotkeyConfig {
                raw: DEFAULT_RAW_CHORD.to_string(),
                format: DEFAULT_FORMAT_CHORD.to_string(),
                toggle_translation: DEFAULT_TOGGLE_CHORD.to_string(),
                suppress_trigger: DEFAULT_SUPPRESS_TRIGGER,
            },
            audio: AudioConfig {
                selected_device: None,
            },
            behaviour: BehaviourConfig {
                auto_paste: DEFAULT_AUTO_PASTE,
                max_session_secs: DEFAULT_MAX_SESSION_SECS,
            },
            server: ServerConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            },
        }
    }
}
