//! Shared numeric constants for the canvas crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest allowed camera zoom.
pub const MIN_ZOOM: f64 = 0.25;

/// Largest allowed camera zoom.
pub const MAX_ZOOM: f64 = 3.0;

/// Default exponent scale applied to wheel deltas when zooming.
pub const DEFAULT_ZOOM_SENSITIVITY: f64 = 0.01;

// ── Gestures ────────────────────────────────────────────────────

/// Maximum pointer travel, in screen pixels, for a press/release to count as a click.
pub const DRAG_THRESHOLD_PX: f64 = 3.0;

/// Key that enables primary-button panning while held (the space bar).
pub const DEFAULT_PAN_KEY: &str = " ";

/// Pixels per line for wheel events reported in line mode.
pub const DEFAULT_LINE_HEIGHT_PX: f64 = 16.0;

// ── Focus animation ─────────────────────────────────────────────

/// Fraction of the remaining distance covered on each animation frame.
pub const DEFAULT_FOCUS_LERP: f64 = 0.1;

/// Remaining distance, in world units, below which the camera snaps to its goal.
pub const DEFAULT_FOCUS_SNAP_DISTANCE: f64 = 1.0;
