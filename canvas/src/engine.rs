//! Engine core: the camera, gesture state and focus animator behind one
//! input-in, actions-out interface.
//!
//! [`EngineCore`] has no browser dependency. Every handler mutates state and
//! returns the [`Action`]s the host must perform; the browser side lives in
//! [`crate::binding`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::Serialize;
use tracing::debug;

use crate::animator::{CameraAnimator, Step};
use crate::camera::{Camera, ScreenPoint, Viewport, WorldPoint};
use crate::config::EngineConfig;
use crate::gesture::{GestureState, WheelIntent, classify_wheel};
use crate::input::{Button, Cursor, InputEvent, Key, Modifiers, WheelDelta};
use crate::pan::pan_by;
use crate::zoom::zoom_at;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// A click landed on this world point; the host may place something there.
    PlaceAt(WorldPoint),
    /// Show this cursor over the surface.
    SetCursor(Cursor),
    /// Capture the active pointer to the surface.
    CapturePointer,
    /// Release a previously captured pointer.
    ReleasePointer,
    /// Suppress the browser's default handling of the current event.
    PreventDefault,
    /// The camera changed; re-apply layer transforms.
    RenderNeeded,
    /// Schedule an animation frame.
    RequestFrame,
    /// Cancel the scheduled animation frame.
    CancelFrame,
    /// The focus animation finished.
    FocusCleared,
}

/// Core engine state. All logic that doesn't depend on the DOM.
#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    pub(crate) camera: Camera,
    pub(crate) gesture: GestureState,
    pub(crate) animator: CameraAnimator,
    pub(crate) viewport: Viewport,
    pub(crate) config: EngineConfig,
    frame_pending: bool,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine using `config`. The caller is expected to have validated it.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            animator: CameraAnimator::new(config.focus_lerp, config.focus_snap_distance),
            config,
            ..Self::default()
        }
    }

    // --- Viewport ---

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    // --- Camera ---

    /// Replace the camera, e.g. when restoring a saved view. Zoom is re-clamped.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = Camera::new(camera.x, camera.y, camera.zoom);
    }

    // --- Queries ---

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.gesture.cursor
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn focus_target(&self) -> Option<WorldPoint> {
        self.animator.target()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_active()
    }

    /// Whether an animation frame has been requested and not yet delivered.
    #[must_use]
    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    // --- Pointer ---

    pub fn on_pointer_down(&mut self, screen_pt: ScreenPoint, button: Button) -> Vec<Action> {
        let mut actions = Vec::new();
        self.gesture.pointer_down(screen_pt, button, &mut actions);
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: ScreenPoint) -> Vec<Action> {
        let mut actions = Vec::new();
        self.gesture.pointer_move(&mut self.camera, screen_pt, &mut actions);
        actions
    }

    pub fn on_pointer_up(&mut self, screen_pt: ScreenPoint, button: Button) -> Vec<Action> {
        let mut actions = Vec::new();
        let threshold_sq = self.config.drag_threshold_sq();
        self.gesture.pointer_up(&self.camera, screen_pt, button, threshold_sq, &mut actions);
        actions
    }

    /// Pointer cancelled or capture lost.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.gesture.pointer_cancel(&mut actions);
        actions
    }

    pub fn on_context_menu(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.gesture.context_menu(&mut actions);
        actions
    }

    // --- Wheel ---

    /// Zoom (precision modifier held) or scroll the camera.
    ///
    /// The browser default is always suppressed so the page never scrolls or
    /// zooms underneath the surface.
    pub fn on_wheel(&mut self, screen_pt: ScreenPoint, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = vec![Action::PreventDefault];
        let (dx, dy) = delta.to_pixels(self.config.line_height_px, &self.viewport);

        let before = self.camera;
        self.camera = match classify_wheel(dx, dy, modifiers) {
            WheelIntent::Zoom { delta } => zoom_at(self.camera, screen_pt, delta, self.config.zoom_sensitivity),
            WheelIntent::Pan { dx, dy } => pan_by(self.camera, dx, dy),
        };
        if self.camera != before {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: &Key, repeat: bool, editable: bool) -> Vec<Action> {
        let mut actions = Vec::new();
        self.gesture.key_down(key, &self.config.pan_key, repeat, editable, &mut actions);
        actions
    }

    pub fn on_key_up(&mut self, key: &Key, editable: bool) -> Vec<Action> {
        let mut actions = Vec::new();
        self.gesture.key_up(key, &self.config.pan_key, editable, &mut actions);
        actions
    }

    /// Window lost focus or the page was hidden.
    pub fn on_blur(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.config.reset_modifier_on_blur {
            self.gesture.blur(&mut actions);
        }
        actions
    }

    // --- Focus animation ---

    /// Start (or retarget) the focus animation toward `target`.
    pub fn focus_on(&mut self, target: WorldPoint) -> Vec<Action> {
        let mut actions = Vec::new();
        self.animator.set_target(target);
        debug!(x = target.x, y = target.y, "focus requested");
        if !self.frame_pending {
            self.frame_pending = true;
            actions.push(Action::RequestFrame);
        }
        actions
    }

    /// Stop the focus animation where it is. Emits no `FocusCleared`.
    pub fn clear_focus(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.animator.clear() {
            debug!("focus cleared by host");
        }
        if self.frame_pending {
            self.frame_pending = false;
            actions.push(Action::CancelFrame);
        }
        actions
    }

    /// Advance the focus animation against the surface geometry measured for
    /// this frame. Hosts whose surface can resize mid-animation call this.
    pub fn on_animation_frame_in(&mut self, viewport: Viewport) -> Vec<Action> {
        self.viewport = viewport;
        self.on_animation_frame()
    }

    /// Advance the focus animation. Call once per delivered animation frame.
    pub fn on_animation_frame(&mut self) -> Vec<Action> {
        self.frame_pending = false;
        match self.animator.tick(&mut self.camera, &self.viewport) {
            Step::Idle => Vec::new(),
            Step::Skipped => self.request_frame(Vec::new()),
            Step::Moved => self.request_frame(vec![Action::RenderNeeded]),
            Step::Converged => {
                debug!(x = self.camera.x, y = self.camera.y, "focus converged");
                vec![Action::RenderNeeded, Action::FocusCleared]
            }
        }
    }

    fn request_frame(&mut self, mut actions: Vec<Action>) -> Vec<Action> {
        self.frame_pending = true;
        actions.push(Action::RequestFrame);
        actions
    }

    // --- Event stream ---

    /// Dispatch one event in data form to the matching handler.
    pub fn handle(&mut self, event: &InputEvent) -> Vec<Action> {
        match event {
            InputEvent::PointerDown { x, y, button } => self.on_pointer_down(ScreenPoint::new(*x, *y), *button),
            InputEvent::PointerMove { x, y } => self.on_pointer_move(ScreenPoint::new(*x, *y)),
            InputEvent::PointerUp { x, y, button } => self.on_pointer_up(ScreenPoint::new(*x, *y), *button),
            InputEvent::PointerCancel => self.on_pointer_cancel(),
            InputEvent::ContextMenu => self.on_context_menu(),
            InputEvent::Wheel { x, y, dx, dy, mode, modifiers } => {
                let delta = WheelDelta { dx: *dx, dy: *dy, mode: *mode };
                self.on_wheel(ScreenPoint::new(*x, *y), delta, *modifiers)
            }
            InputEvent::KeyDown { key, repeat, editable } => self.on_key_down(key, *repeat, *editable),
            InputEvent::KeyUp { key, editable } => self.on_key_up(key, *editable),
            InputEvent::Blur => self.on_blur(),
            InputEvent::Resize { left, top, width, height } => {
                self.set_viewport(Viewport { left: *left, top: *top, width: *width, height: *height });
                Vec::new()
            }
            InputEvent::Focus { x, y } => self.focus_on(WorldPoint::new(*x, *y)),
            InputEvent::ClearFocus => self.clear_focus(),
            InputEvent::Frame => self.on_animation_frame(),
        }
    }
}
