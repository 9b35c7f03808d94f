//! User-tunable settings, read from a RON file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the settings file inside the per-user config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.ron";

/// Errors that can occur when loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: ron::de::SpannedError,
    },
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Frame presets, zoom behaviour and output naming.
///
/// Every field falls back to its default when absent from the file, so a
/// settings file only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Width shared by both frame presets, in display pixels.
    pub frame_width: u32,
    /// Height of the portrait preset.
    pub portrait_height: u32,
    /// Height of the square preset.
    pub square_height: u32,
    /// Sources smaller than this on either side are upscaled on load.
    pub min_source_dimension: u32,
    /// Initial zoom step applied per scroll notch.
    pub zoom_step: f32,
    pub zoom_step_min: f32,
    pub zoom_step_max: f32,
    /// Ceiling for the zoom level.
    pub zoom_max: f32,
    /// Amount the zoom step changes per accelerated scroll notch.
    pub zoom_step_increment: f32,
    /// Leading part of every output file name.
    pub output_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_width: 512,
            portrait_height: 648,
            square_height: 512,
            min_source_dimension: 648,
            zoom_step: 1.1,
            zoom_step_min: 1.05,
            zoom_step_max: 1.5,
            zoom_step_increment: 0.05,
            zoom_max: 64.0,
            output_prefix: "trimmed".to_string(),
        }
    }
}

impl Settings {
    /// Default location: `<config dir>/trimmr/settings.ron`.
    pub fn default_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("trimmr").join(SETTINGS_FILE_NAME))
    }

    /// Parses settings from a RON string and validates them.
    pub fn from_ron(path: &Path, text: &str) -> Result<Self, SettingsError> {
        let settings: Settings = ron::from_str(text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from `path`.
    ///
    /// A missing file is not an error: defaults are returned.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_ron(path, &text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Checks the values a hand-edited file could get wrong.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.frame_width == 0 || self.portrait_height == 0 || self.square_height == 0 {
            return Err(SettingsError::Invalid(
                "frame dimensions must be non-zero".to_string(),
            ));
        }
        if self.zoom_step_min <= 1.0 || self.zoom_step_max < self.zoom_step_min {
            return Err(SettingsError::Invalid(format!(
                "zoom step range {}..={} must lie above 1.0",
                self.zoom_step_min, self.zoom_step_max
            )));
        }
        if !(self.zoom_step_min..=self.zoom_step_max).contains(&self.zoom_step) {
            return Err(SettingsError::Invalid(format!(
                "zoom step {} is outside {}..={}",
                self.zoom_step, self.zoom_step_min, self.zoom_step_max
            )));
        }
        if !self.zoom_max.is_finite() || self.zoom_max < 1.0 {
            return Err(SettingsError::Invalid(format!(
                "zoom ceiling {} must be finite and at least 1.0",
                self.zoom_max
            )));
        }
        if self.zoom_step_increment <= 0.0 {
            return Err(SettingsError::Invalid(
                "zoom step increment must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
