//! Pan controller: camera translation from scroll deltas and pointer drags.
//!
//! Both modes divide by zoom so a given screen-pixel movement always moves
//! the same visual distance. Zoom is never changed here.

#[cfg(test)]
#[path = "pan_test.rs"]
mod pan_test;

use crate::camera::{Camera, ScreenPoint};

/// Translate the camera by a continuous scroll delta (screen pixels).
///
/// Positive deltas move the view right/down, so content scrolls left/up.
#[must_use]
pub fn pan_by(camera: Camera, dx: f64, dy: f64) -> Camera {
    Camera {
        x: camera.x + camera.screen_dist_to_world(dx),
        y: camera.y + camera.screen_dist_to_world(dy),
        ..camera
    }
}

/// Translate the camera for a pointer drag from `prev` to `cur`.
///
/// Content follows the pointer: dragging right moves the camera left.
#[must_use]
pub fn pan_drag(camera: Camera, prev: ScreenPoint, cur: ScreenPoint) -> Camera {
    Camera {
        x: camera.x - camera.screen_dist_to_world(cur.x - prev.x),
        y: camera.y - camera.screen_dist_to_world(cur.y - prev.y),
        ..camera
    }
}
