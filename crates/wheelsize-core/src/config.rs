//! Resize configuration and its JSON file.

use crate::error::{ConfigError, ConfigResult};
use crate::geometry::Axis;
use crate::keys::KeyCode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "WHEELSIZE_CONFIG";

const CONFIG_FILE_NAME: &str = "config.json";

/// Pixels per wheel tick and the modifier for each axis.
///
/// Loaded once at startup and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResizeConfig {
    /// Width change per full wheel tick, in pixels at 96 DPI.
    pub width_increment: i32,
    /// Height change per full wheel tick, in pixels at 96 DPI.
    pub height_increment: i32,
    /// Modifier that selects width resizing.
    #[serde(rename = "widthResizeKey")]
    pub width_key: KeyCode,
    /// Modifier that selects height resizing.
    #[serde(rename = "heightResizeKey")]
    pub height_key: KeyCode,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            width_increment: 10,
            height_increment: 10,
            width_key: KeyCode::CONTROL,
            height_key: KeyCode::ALT,
        }
    }
}

impl ResizeConfig {
    /// Base increment for `axis`.
    pub fn increment_for(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.width_increment,
            Axis::Vertical => self.height_increment,
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.width_increment <= 0 {
            return Err(ConfigError::Invalid(format!(
                "widthIncrement must be positive, got {}",
                self.width_increment
            )));
        }
        if self.height_increment <= 0 {
            return Err(ConfigError::Invalid(format!(
                "heightIncrement must be positive, got {}",
                self.height_increment
            )));
        }
        if self.width_key.code() == 0 || self.height_key.code() == 0 {
            return Err(ConfigError::Invalid("key code 0 is not a key".into()));
        }
        if self.width_key == self.height_key {
            warn!(
                key = %self.width_key,
                "Width and height use the same key, height resizing is unreachable"
            );
        }
        Ok(())
    }
}

/// Get the config directory for wheelsize.
pub fn config_dir() -> PathBuf {
    let base = dirs_next::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("wheelsize")
}

/// Get the log directory.
pub fn log_dir() -> PathBuf {
    config_dir().join("logs")
}

/// Config file path, honouring [`CONFIG_PATH_ENV`].
pub fn default_config_path() -> PathBuf {
    match std::env::var_os(CONFIG_PATH_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => config_dir().join(CONFIG_FILE_NAME),
    }
}

/// Read, parse and validate a config file.
pub fn load_config(path: &Path) -> ConfigResult<ResizeConfig> {
    let json = fs::read_to_string(path)?;
    let config: ResizeConfig = serde_json::from_str(&json)?;
    config.validate()?;
    debug!(?path, "Loaded config");
    Ok(config)
}

/// Write a config file, creating parent directories as needed.
pub fn save_config(path: &Path, config: &ResizeConfig) -> ConfigResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    info!(?path, "Saved config");
    Ok(())
}

/// Outcome of [`load_or_create`].
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: ResizeConfig,
    /// Set when an existing file was unusable and defaults replaced it.
    pub recovered: Option<ConfigError>,
}

/// Load the config, falling back to defaults.
///
/// A missing file is created with the defaults. An unreadable, malformed or
/// invalid file is moved aside to `<name>.bak` and replaced with the defaults,
/// and the error is handed back so the user can be told.
/// Failing to write the default file is logged and otherwise ignored.
pub fn load_or_create(path: &Path) -> LoadedConfig {
    let recovered = match load_config(path) {
        Ok(config) => {
            info!(
                ?path,
                width_increment = config.width_increment,
                height_increment = config.height_increment,
                width_key = %config.width_key,
                height_key = %config.height_key,
                "Config loaded"
            );
            return LoadedConfig {
                config,
                recovered: None,
            };
        }
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(?path, "No config file, writing defaults");
            None
        }
        Err(e) => {
            warn!(?path, error = %e, "Failed to load config, using defaults");
            let backup = backup_path(path);
            match fs::rename(path, &backup) {
                Ok(()) => info!(?backup, "Moved unusable config aside"),
                Err(e) => warn!(?backup, error = %e, "Failed to back up unusable config"),
            }
            Some(e)
        }
    };

    let config = ResizeConfig::default();
    if let Err(e) = save_config(path, &config) {
        warn!(?path, error = %e, "Failed to write default config");
    }
    LoadedConfig { config, recovered }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| CONFIG_FILE_NAME.into());
    name.push(".bak");
    path.with_file_name(name)
}
