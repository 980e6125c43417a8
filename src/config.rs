// SPDX-License-Identifier: GPL-3.0-only

//! Runtime configuration
//!
//! Values come from built-in defaults, then an optional JSON file, then
//! command-line overrides applied by the binary.

use crate::backends::camera::PixelFormat;
use crate::constants;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Directory name under the user's config dir
const CONFIG_DIR_NAME: &str = "qr-monitor";

/// Config file name
const CONFIG_FILE_NAME: &str = "config.json";

/// How annotated frames are presented
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// One native window per camera
    #[default]
    Window,
    /// Cameras rendered side by side in the terminal
    Terminal,
    /// No preview, console output only
    Headless,
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayMode::Window => write!(f, "window"),
            DisplayMode::Terminal => write!(f, "terminal"),
            DisplayMode::Headless => write!(f, "headless"),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// V4L2 device indices to poll, in order
    pub camera_indices: Vec<u32>,
    /// Requested capture width
    pub width: u32,
    /// Requested capture height
    pub height: u32,
    /// Preferred capture pixel format
    pub pixel_format: PixelFormat,
    /// Debounce window for repeated payloads, in milliseconds
    pub debounce_ms: u64,
    /// Frames are downscaled to this size before decoding
    pub max_dimension: u32,
    /// Preview backend
    pub display: DisplayMode,
    /// Instruction caption drawn on each frame
    pub caption: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camera_indices: constants::DEFAULT_CAMERA_INDICES.to_vec(),
            width: constants::DEFAULT_WIDTH,
            height: constants::DEFAULT_HEIGHT,
            pixel_format: PixelFormat::default(),
            debounce_ms: constants::DEBOUNCE_WINDOW.as_millis() as u64,
            max_dimension: constants::DEFAULT_MAX_DECODE_DIMENSION,
            display: DisplayMode::default(),
            caption: constants::DEFAULT_CAPTION.to_string(),
        }
    }
}

impl Config {
    /// Debounce window as a duration
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Default config file location (`$XDG_CONFIG_HOME/qr-monitor/config.json`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load a config file; missing fields fall back to defaults
    ///
    /// Values are not validated here, so command-line overrides can still
    /// replace them before [`Config::validate`] runs.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Resolve the configuration for a run
    ///
    /// An explicit path must exist. Without one, the default location is read
    /// only if present.
    pub fn load(explicit: Option<&Path>) -> AppResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                debug!("No configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reject values the scan loop cannot work with
    pub fn validate(&self) -> AppResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(AppError::Config(format!(
                "resolution must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.max_dimension == 0 {
            return Err(AppError::Config(
                "max_dimension must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Serialize as pretty JSON (for `qr-monitor config`)
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
