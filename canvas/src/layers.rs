//! Render layers: the transformed content layer and the screen-space overlay.
//!
//! Board content lives in world coordinates inside a single layer that the
//! host moves with one CSS transform. Annotation pins do not scale with zoom,
//! so they sit in an untransformed overlay and are positioned individually
//! from their world anchors.

#[cfg(test)]
#[path = "layers_test.rs"]
mod layers_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::{Camera, ScreenPoint, WorldPoint};

/// Identifier of a discussion thread anchored on the board.
pub type ThreadId = Uuid;

/// Translate-then-scale transform applied to the content layer.
///
/// A world point `p` lands on screen at `p * scale + translate`, which is the
/// same mapping as [`Camera::world_to_screen`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl LayerTransform {
    /// Transform for the content layer under `camera`.
    #[must_use]
    pub fn content(camera: &Camera) -> Self {
        Self {
            translate_x: -camera.x * camera.zoom,
            translate_y: -camera.y * camera.zoom,
            scale: camera.zoom,
        }
    }

    /// Map a world point through the transform.
    #[must_use]
    pub fn apply(&self, world: WorldPoint) -> ScreenPoint {
        ScreenPoint::new(world.x * self.scale + self.translate_x, world.y * self.scale + self.translate_y)
    }

    /// CSS `transform` value. Pair with `transform-origin: 0 0` on the layer.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!("translate({}px, {}px) scale({})", self.translate_x, self.translate_y, self.scale)
    }
}

/// A thread's anchor on the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotationPin {
    pub id: ThreadId,
    pub at: WorldPoint,
}

/// Where an annotation pin should be drawn in the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinPlacement {
    pub id: ThreadId,
    pub screen: ScreenPoint,
}

/// Overlay positions for `pins` under `camera`, in input order.
#[must_use]
pub fn place_pins(pins: &[AnnotationPin], camera: &Camera) -> Vec<PinPlacement> {
    pins.iter()
        .map(|pin| PinPlacement { id: pin.id, screen: camera.world_to_screen(pin.at) })
        .collect()
}
