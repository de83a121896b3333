//! Tunable board settings.

use crate::editor::DEFAULT_PEN_SIZE;
use crate::selection::RESIZE_HANDLE_SIZE;
use crate::snap::SNAP_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for a board and its interactions.
///
/// Every field has a default, so a JSON file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Canvas width in canvas units.
    pub canvas_width: f64,
    /// Canvas height in canvas units.
    pub canvas_height: f64,
    /// Pen size a new editor starts with.
    pub pen_size: f64,
    /// Edge snapping distance.
    pub snap_threshold: f64,
    /// Pointer travel beyond which a press becomes a drag.
    pub drag_threshold: f64,
    /// Arrow-key nudge distance.
    pub nudge_step: f64,
    /// Quiet time before a drag-select recomputes selection.
    pub select_debounce_ms: u64,
    /// Side of the square resize handle.
    pub resize_handle_size: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1280.0,
            canvas_height: 720.0,
            pen_size: DEFAULT_PEN_SIZE,
            snap_threshold: SNAP_THRESHOLD,
            drag_threshold: 0.1,
            nudge_step: 2.0,
            select_debounce_ms: 10,
            resize_handle_size: RESIZE_HANDLE_SIZE,
        }
    }
}

impl BoardConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Debounce interval for drag-select.
    pub fn select_debounce(&self) -> Duration {
        Duration::from_millis(self.select_debounce_ms)
    }
}
