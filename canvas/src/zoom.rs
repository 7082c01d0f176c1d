//! Zoom controller: exponential zoom anchored at a screen point.
//!
//! The world point under the anchor stays under the anchor. Zoom is clamped
//! before the anchor correction, so a saturated zoom still produces a
//! consistent camera.

#[cfg(test)]
#[path = "zoom_test.rs"]
mod zoom_test;

use crate::camera::{Camera, ScreenPoint, clamp_zoom};

/// Compute the camera after zooming by `delta` around `anchor`.
///
/// `delta` is a continuous signed value (positive zooms out, negative zooms
/// in); the scale factor is `exp(-delta * sensitivity)`, which is always
/// positive. A zero or non-finite delta, or a zoom already pinned at the bound
/// it is pushed against, returns `camera` unchanged.
#[must_use]
pub fn zoom_at(camera: Camera, anchor: ScreenPoint, delta: f64, sensitivity: f64) -> Camera {
    if !delta.is_finite() || delta.abs() < f64::EPSILON {
        return camera;
    }

    let world_anchor = camera.screen_to_world(anchor);
    let zoom = clamp_zoom(camera.zoom * (-delta * sensitivity).exp());
    if (zoom - camera.zoom).abs() < f64::EPSILON {
        return camera;
    }

    Camera {
        x: world_anchor.x - anchor.x / zoom,
        y: world_anchor.y - anchor.y / zoom,
        zoom,
    }
}
