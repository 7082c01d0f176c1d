//! Focus animation: eases the camera toward a world point, one step per frame.
//!
//! The animator is independent of user input. A pan or zoom during an active
//! animation changes the camera it is easing, and the next tick simply
//! continues from wherever the camera ended up.

#[cfg(test)]
#[path = "animator_test.rs"]
mod animator_test;

use crate::camera::{Camera, Viewport, WorldPoint};
use crate::consts::{DEFAULT_FOCUS_LERP, DEFAULT_FOCUS_SNAP_DISTANCE};

/// Outcome of a single animation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No target; nothing to do and no further frames needed.
    Idle,
    /// The surface has no usable size yet; the camera was left alone.
    Skipped,
    /// The camera moved toward the target; more frames are needed.
    Moved,
    /// The camera snapped onto the target and the target was cleared.
    Converged,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraAnimator {
    target: Option<WorldPoint>,
    lerp: f64,
    snap_distance: f64,
}

impl Default for CameraAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_LERP, DEFAULT_FOCUS_SNAP_DISTANCE)
    }
}

impl CameraAnimator {
    #[must_use]
    pub fn new(lerp: f64, snap_distance: f64) -> Self {
        Self { target: None, lerp, snap_distance }
    }

    /// World point the camera is easing toward, if any.
    #[must_use]
    pub fn target(&self) -> Option<WorldPoint> {
        self.target
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    /// Start easing toward `target`, replacing any previous target.
    pub fn set_target(&mut self, target: WorldPoint) {
        self.target = Some(target);
    }

    /// Drop the target. Returns whether one was set.
    pub fn clear(&mut self) -> bool {
        self.target.take().is_some()
    }

    /// Advance one frame.
    ///
    /// The goal is the camera origin that centers the target at the current
    /// zoom. Each tick covers `lerp` of the remaining distance; once the
    /// remaining distance drops below the snap distance the camera lands
    /// exactly on the goal and the target is cleared.
    pub fn tick(&mut self, camera: &mut Camera, viewport: &Viewport) -> Step {
        let Some(target) = self.target else {
            return Step::Idle;
        };
        if viewport.is_degenerate() {
            return Step::Skipped;
        }

        let goal = camera.origin_centering(target, viewport);
        let dx = goal.x - camera.x;
        let dy = goal.y - camera.y;

        if dx.hypot(dy) < self.snap_distance {
            camera.x = goal.x;
            camera.y = goal.y;
            self.target = None;
            return Step::Converged;
        }

        camera.x += dx * self.lerp;
        camera.y += dy * self.lerp;
        Step::Moved
    }
}
