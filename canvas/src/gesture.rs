//! Gesture disambiguation: turns pointer, keyboard and wheel input into pans,
//! zooms and clicks.
//!
//! The pointer side is a two-state machine ([`InputState::Idle`] /
//! [`InputState::Panning`]). A press starts a pan when it uses the middle
//! button, or the primary button while the pan key is held; any other press
//! stays idle and becomes a click on release only if the pointer travelled
//! less than the drag threshold. Wheel input is classified independently of
//! the pointer state.
//!
//! Transitions append their side effects to an action list instead of touching
//! the DOM, so the host decides how to perform capture, cursor changes and
//! default suppression.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use tracing::{debug, trace};

use crate::camera::{Camera, ScreenPoint};
use crate::engine::Action;
use crate::input::{Button, Cursor, InputState, Key, Modifiers};
use crate::pan::pan_drag;

/// Where and with which button the current pointer session started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPress {
    pub at: ScreenPoint,
    pub button: Button,
}

/// Transient gesture state owned by the engine. Never rendered.
#[derive(Debug, Clone, Default)]
pub struct GestureState {
    /// Pointer state machine.
    pub input: InputState,
    /// Press that opened the current pointer session; consumed on release.
    pub pointer_down_at: Option<PointerPress>,
    /// The pan key is currently held.
    pub modifier_held: bool,
    /// Cursor affordance last reported to the host.
    pub cursor: Cursor,
}

/// What a wheel event should do to the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelIntent {
    /// Zoom around the wheel position by this signed delta.
    Zoom { delta: f64 },
    /// Scroll the camera by these pixel deltas.
    Pan { dx: f64, dy: f64 },
}

/// Classify a wheel event whose deltas are already in pixels.
///
/// The precision-zoom modifier (ctrl, which trackpads also set for pinch)
/// routes the vertical delta to zoom; otherwise both deltas pan.
#[must_use]
pub fn classify_wheel(dx: f64, dy: f64, modifiers: Modifiers) -> WheelIntent {
    if modifiers.precision_zoom() { WheelIntent::Zoom { delta: dy } } else { WheelIntent::Pan { dx, dy } }
}

impl GestureState {
    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self.input, InputState::Panning { .. })
    }

    /// Last pointer position seen during an active pan.
    #[must_use]
    pub fn pan_anchor(&self) -> Option<ScreenPoint> {
        match self.input {
            InputState::Panning { last_screen } => Some(last_screen),
            InputState::Idle => None,
        }
    }

    /// Handle a pointer press.
    pub fn pointer_down(&mut self, point: ScreenPoint, button: Button, actions: &mut Vec<Action>) {
        if self.is_panning() {
            return;
        }
        self.pointer_down_at = Some(PointerPress { at: point, button });

        let pan_trigger = button == Button::Middle || (button == Button::Primary && self.modifier_held);
        if !pan_trigger {
            return;
        }
        self.input = InputState::Panning { last_screen: point };
        actions.push(Action::CapturePointer);
        self.set_cursor(Cursor::Panning, actions);
        debug!(?button, x = point.x, y = point.y, "pan started");
    }

    /// Handle pointer movement. Only an active pan reacts.
    pub fn pointer_move(&mut self, camera: &mut Camera, point: ScreenPoint, actions: &mut Vec<Action>) {
        let InputState::Panning { last_screen } = self.input else {
            return;
        };
        if last_screen == point {
            return;
        }
        *camera = pan_drag(*camera, last_screen, point);
        self.input = InputState::Panning { last_screen: point };
        actions.push(Action::RenderNeeded);
        trace!(x = camera.x, y = camera.y, "pan moved");
    }

    /// Handle a pointer release.
    ///
    /// Ends an active pan, or emits [`Action::PlaceAt`] when an idle primary
    /// press/release pair travelled less than the drag threshold. A release
    /// with no recorded press emits nothing.
    pub fn pointer_up(
        &mut self,
        camera: &Camera,
        point: ScreenPoint,
        button: Button,
        threshold_sq: f64,
        actions: &mut Vec<Action>,
    ) {
        if self.is_panning() {
            self.end_pan(actions);
            return;
        }

        let Some(press) = self.pointer_down_at.take() else {
            trace!("pointer up without a matching press");
            return;
        };
        if button != Button::Primary {
            return;
        }
        if press.at.distance_sq(point) < threshold_sq {
            let world = camera.screen_to_world(point);
            actions.push(Action::PlaceAt(world));
            debug!(x = world.x, y = world.y, "click at world point");
        }
    }

    /// Force-end the pointer session (capture lost, pointer cancelled). Never clicks.
    pub fn pointer_cancel(&mut self, actions: &mut Vec<Action>) {
        if self.is_panning() {
            self.end_pan(actions);
            debug!("pan cancelled");
        }
        self.pointer_down_at = None;
    }

    /// Suppress the native context menu while it would interrupt a pan.
    pub fn context_menu(&self, actions: &mut Vec<Action>) {
        let middle_press = self.pointer_down_at.is_some_and(|press| press.button == Button::Middle);
        if self.is_panning() || middle_press {
            actions.push(Action::PreventDefault);
        }
    }

    /// Track the pan key going down.
    ///
    /// Keys aimed at an editable control are ignored entirely. The pan key's
    /// default action (page scroll) is suppressed, including on auto-repeat.
    pub fn key_down(&mut self, key: &Key, pan_key: &str, repeat: bool, editable: bool, actions: &mut Vec<Action>) {
        if editable || key.as_str() != pan_key {
            return;
        }
        actions.push(Action::PreventDefault);
        if repeat || self.modifier_held {
            return;
        }
        self.modifier_held = true;
        if !self.is_panning() {
            self.set_cursor(Cursor::PanReady, actions);
        }
        trace!("pan key down");
    }

    /// Track the pan key going up.
    ///
    /// A release aimed at an editable control still clears a held key, so focus
    /// moving into a text field mid-press cannot leave it stuck, but the event
    /// itself is left alone.
    pub fn key_up(&mut self, key: &Key, pan_key: &str, editable: bool, actions: &mut Vec<Action>) {
        if key.as_str() != pan_key {
            return;
        }
        if !editable {
            actions.push(Action::PreventDefault);
        }
        if !self.modifier_held {
            return;
        }
        self.modifier_held = false;
        if !self.is_panning() {
            self.set_cursor(Cursor::Default, actions);
        }
        trace!("pan key up");
    }

    /// Forget a held pan key after the window loses focus.
    ///
    /// The key-up for a key held while focus leaves the window never arrives.
    pub fn blur(&mut self, actions: &mut Vec<Action>) {
        if !self.modifier_held {
            return;
        }
        self.modifier_held = false;
        if !self.is_panning() {
            self.set_cursor(Cursor::Default, actions);
        }
        debug!("pan key reset on blur");
    }

    fn end_pan(&mut self, actions: &mut Vec<Action>) {
        self.input = InputState::Idle;
        self.pointer_down_at = None;
        actions.push(Action::ReleasePointer);
        let resting = self.resting_cursor();
        self.set_cursor(resting, actions);
        debug!("pan ended");
    }

    fn resting_cursor(&self) -> Cursor {
        if self.modifier_held { Cursor::PanReady } else { Cursor::Default }
    }

    fn set_cursor(&mut self, cursor: Cursor, actions: &mut Vec<Action>) {
        if self.cursor != cursor {
            self.cursor = cursor;
            actions.push(Action::SetCursor(cursor));
        }
    }
}
