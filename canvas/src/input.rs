//! Input model: modifier keys, mouse buttons, wheel deltas, cursor affordance,
//! and the serializable input event stream.
//!
//! These are the types the host translates raw DOM events into before handing
//! them to [`crate::engine::EngineCore`]. `InputEvent` is the same vocabulary in
//! data form, so a recorded session can be replayed without a browser.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::{ScreenPoint, Viewport};

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held. Trackpads also set this for pinch gestures.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether a wheel event carrying these modifiers should zoom rather than pan.
    #[must_use]
    pub fn precision_zoom(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    #[default]
    Primary,
    /// Middle mouse button (scroll wheel click). Always pans.
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
    /// Any other button (back/forward, pen barrel buttons).
    Other,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Other,
        }
    }
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `" "`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unit in which a wheel event reports its deltas (DOM `WheelEvent.deltaMode`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl DeltaMode {
    /// Map a DOM `deltaMode` code. Unknown codes are treated as pixels.
    #[must_use]
    pub fn from_dom(code: u32) -> Self {
        match code {
            1 => Self::Line,
            2 => Self::Page,
            _ => Self::Pixel,
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelDelta {
    /// Horizontal scroll amount.
    pub dx: f64,
    /// Vertical scroll amount (positive = down).
    pub dy: f64,
    /// Unit of `dx` / `dy`.
    #[serde(default)]
    pub mode: DeltaMode,
}

impl WheelDelta {
    /// A delta already expressed in pixels.
    #[must_use]
    pub fn pixels(dx: f64, dy: f64) -> Self {
        Self { dx, dy, mode: DeltaMode::Pixel }
    }

    /// Normalize to pixels. Line mode scales by `line_height`; page mode by the viewport size.
    #[must_use]
    pub fn to_pixels(self, line_height: f64, viewport: &Viewport) -> (f64, f64) {
        match self.mode {
            DeltaMode::Pixel => (self.dx, self.dy),
            DeltaMode::Line => (self.dx * line_height, self.dy * line_height),
            DeltaMode::Page => (self.dx * viewport.width, self.dy * viewport.height),
        }
    }
}

/// Cursor affordance shown over the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cursor {
    #[default]
    Default,
    /// The pan modifier is held; a primary press will start a pan.
    PanReady,
    /// A pan gesture is in progress.
    Panning,
}

impl Cursor {
    /// CSS `cursor` value for this affordance.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PanReady => "grab",
            Self::Panning => "grabbing",
        }
    }
}

/// Internal state for the pointer state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum InputState {
    /// No pan in progress; a press may still turn into a click.
    #[default]
    Idle,
    /// The user is panning the canvas by dragging.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: ScreenPoint,
    },
}

/// One input event in data form.
///
/// Mirrors the handler set on [`crate::engine::EngineCore`], plus the
/// host-driven events (resize, focus requests, animation frames) needed to
/// replay a full session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
    },
    PointerCancel,
    ContextMenu,
    Wheel {
        x: f64,
        y: f64,
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
        #[serde(default)]
        mode: DeltaMode,
        #[serde(default)]
        modifiers: Modifiers,
    },
    KeyDown {
        key: Key,
        #[serde(default)]
        repeat: bool,
        #[serde(default)]
        editable: bool,
    },
    KeyUp {
        key: Key,
        #[serde(default)]
        editable: bool,
    },
    Blur,
    Resize {
        #[serde(default)]
        left: f64,
        #[serde(default)]
        top: f64,
        width: f64,
        height: f64,
    },
    Focus {
        x: f64,
        y: f64,
    },
    ClearFocus,
    Frame,
}

impl InputEvent {
    /// Short name of the event kind, matching its serialized `type` tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PointerDown { .. } => "pointer_down",
            Self::PointerMove { .. } => "pointer_move",
            Self::PointerUp { .. } => "pointer_up",
            Self::PointerCancel => "pointer_cancel",
            Self::ContextMenu => "context_menu",
            Self::Wheel { .. } => "wheel",
            Self::KeyDown { .. } => "key_down",
            Self::KeyUp { .. } => "key_up",
            Self::Blur => "blur",
            Self::Resize { .. } => "resize",
            Self::Focus { .. } => "focus",
            Self::ClearFocus => "clear_focus",
            Self::Frame => "frame",
        }
    }

}
