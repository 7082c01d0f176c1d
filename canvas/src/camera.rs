#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ZOOM, MIN_ZOOM};

/// A point relative to the top-left corner of the interactive surface, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    #[must_use]
    pub fn distance_sq(self, other: Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }
}

/// A point in unbounded world space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

impl WorldPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Camera state for pan/zoom on the infinite canvas.
///
/// `x` / `y` are the world coordinates shown at the surface's top-left corner
/// and are never clamped. `zoom` is a scale factor (1.0 = no zoom) kept within
/// [`MIN_ZOOM`, `MAX_ZOOM`] by every controller that writes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    #[serde(deserialize_with = "deserialize_zoom")]
    pub(crate) zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Build a camera, clamping `zoom` into the allowed range.
    #[must_use]
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom: clamp_zoom(zoom) }
    }

    /// Scale factor, always within [`MIN_ZOOM`, `MAX_ZOOM`].
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: ScreenPoint) -> WorldPoint {
        WorldPoint {
            x: self.x + screen.x / self.zoom,
            y: self.y + screen.y / self.zoom,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: WorldPoint) -> ScreenPoint {
        ScreenPoint {
            x: (world.x - self.x) * self.zoom,
            y: (world.y - self.y) * self.zoom,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Camera origin that would put `target` at the center of `viewport` at the current zoom.
    #[must_use]
    pub fn origin_centering(&self, target: WorldPoint, viewport: &Viewport) -> WorldPoint {
        let center = viewport.center();
        WorldPoint {
            x: target.x - center.x / self.zoom,
            y: target.y - center.y / self.zoom,
        }
    }
}

fn deserialize_zoom<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer).map(clamp_zoom)
}

/// Clamp a zoom factor into [`MIN_ZOOM`, `MAX_ZOOM`].
///
/// NaN maps to 1.0 so a poisoned computation can never leave the camera unusable.
#[must_use]
pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        return 1.0;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// On-page geometry of the interactive surface, in CSS pixels.
///
/// `left` / `top` are the surface's offset in client coordinates (the
/// bounding rectangle of the hosting element).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// A viewport of the given size anchored at the client origin.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { left: 0.0, top: 0.0, width, height }
    }

    /// Whether the surface has no usable area (zero, negative or non-finite size).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        !(usable(self.width) && usable(self.height))
    }

    /// Screen-space center of the surface.
    #[must_use]
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.width * 0.5, self.height * 0.5)
    }

    /// Convert client (page viewport) coordinates to surface-local screen coordinates.
    #[must_use]
    pub fn to_local(&self, client_x: f64, client_y: f64) -> ScreenPoint {
        ScreenPoint::new(client_x - self.left, client_y - self.top)
    }
}
