//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{MotionGridError, MotionGridResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Camera capture settings.
    pub capture: CaptureConfig,

    /// Frame differencing parameters.
    pub detection: DetectionConfig,

    /// Motion grid settings.
    pub grid: GridConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Camera capture parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Requested frame width in pixels.
    pub width: u32,

    /// Requested frame height in pixels.
    pub height: u32,

    /// Requested frame rate.
    pub fps: u32,

    /// Explicit camera device (e.g. `/dev/video2`). Autodetected when unset.
    pub device: Option<String>,
}

/// Frame differencing parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Absolute difference above which a pixel counts as changed (0-255).
    pub threshold: u8,

    /// Whether to smooth each frame with the 3x3 kernel before differencing.
    pub blur: bool,
}

/// Motion grid settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Cells per side at startup.
    pub default_cells: u32,

    /// Cells per side selected by the number keys `1`, `2`, `3`, ...
    pub presets: Vec<u32>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "motiongrid=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fps: 30,
            device: None,
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            threshold: 25,
            blur: true,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_cells: 10,
            presets: vec![10, 20, 30],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location.
    ///
    /// A missing file yields defaults. A file that exists but cannot be read,
    /// parsed or validated is an error.
    pub fn load() -> MotionGridResult<Self> {
        Self::load_or_default(&config_file_path())
    }

    pub fn load_or_default(path: &Path) -> MotionGridResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path).map_err(|e| {
            MotionGridError::config(format!("Invalid config at {}: {e}", path.display()))
        })
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &Path) -> MotionGridResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> MotionGridResult<()> {
        if self.capture.width == 0 || self.capture.height == 0 {
            return Err(MotionGridError::config(format!(
                "Capture size must be non-zero, got {}x{}",
                self.capture.width, self.capture.height
            )));
        }
        if self.capture.fps == 0 {
            return Err(MotionGridError::config("Capture fps must be non-zero"));
        }
        if self.grid.default_cells == 0 {
            return Err(MotionGridError::config(
                "grid.default_cells must be at least 1",
            ));
        }
        if let Some(idx) = self.grid.presets.iter().position(|&cells| cells == 0) {
            return Err(MotionGridError::config(format!(
                "grid.presets[{idx}] must be at least 1"
            )));
        }
        Ok(())
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("motion-grid").join("config.json")
}
