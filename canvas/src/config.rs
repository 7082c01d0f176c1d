//! Tunable engine settings.
//!
//! Zoom limits are invariants and live in [`crate::consts`]; everything here
//! is empirical tuning that a host may override. The serialized form uses
//! camelCase keys so a JavaScript host can pass its settings object verbatim,
//! and every field falls back to its default when absent.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_FOCUS_LERP, DEFAULT_FOCUS_SNAP_DISTANCE, DEFAULT_LINE_HEIGHT_PX, DEFAULT_PAN_KEY, DEFAULT_ZOOM_SENSITIVITY,
    DRAG_THRESHOLD_PX,
};

/// Error returned by [`EngineConfig::from_json`] and [`EngineConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The input was not valid JSON for an `EngineConfig`.
    #[error("invalid engine config JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A numeric setting is outside its allowed range.
    #[error("`{field}` must be {expected}, got {value}")]
    OutOfRange { field: &'static str, expected: &'static str, value: f64 },
    /// The pan key name is empty.
    #[error("`panKey` must not be empty")]
    EmptyPanKey,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Exponent scale applied to wheel deltas when zooming.
    pub zoom_sensitivity: f64,
    /// Fraction of the remaining distance covered per focus-animation frame.
    pub focus_lerp: f64,
    /// Remaining distance (world units) at which the focus animation snaps and stops.
    pub focus_snap_distance: f64,
    /// Maximum pointer travel (screen pixels) for a press/release to count as a click.
    pub drag_threshold_px: f64,
    /// Key name (DOM `KeyboardEvent.key`) that enables primary-button panning while held.
    pub pan_key: String,
    /// Clear a held pan key when the window loses focus or the page is hidden.
    pub reset_modifier_on_blur: bool,
    /// Pixels per line for wheel events reported in line mode.
    pub line_height_px: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zoom_sensitivity: DEFAULT_ZOOM_SENSITIVITY,
            focus_lerp: DEFAULT_FOCUS_LERP,
            focus_snap_distance: DEFAULT_FOCUS_SNAP_DISTANCE,
            drag_threshold_px: DRAG_THRESHOLD_PX,
            pan_key: DEFAULT_PAN_KEY.to_owned(),
            reset_modifier_on_blur: true,
            line_height_px: DEFAULT_LINE_HEIGHT_PX,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a config from JSON. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input and the range variants
    /// for values [`validate`](Self::validate) rejects.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every setting against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first setting found out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("zoomSensitivity", self.zoom_sensitivity)?;
        if !(self.focus_lerp.is_finite() && self.focus_lerp > 0.0 && self.focus_lerp <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "focusLerp",
                expected: "in (0, 1]",
                value: self.focus_lerp,
            });
        }
        positive("focusSnapDistance", self.focus_snap_distance)?;
        positive("dragThresholdPx", self.drag_threshold_px)?;
        positive("lineHeightPx", self.line_height_px)?;
        if self.pan_key.is_empty() {
            return Err(ConfigError::EmptyPanKey);
        }
        Ok(())
    }

    /// Squared drag threshold, compared against squared pointer travel.
    #[must_use]
    pub fn drag_threshold_sq(&self) -> f64 {
        self.drag_threshold_px * self.drag_threshold_px
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, expected: "finite and > 0", value })
    }
}
