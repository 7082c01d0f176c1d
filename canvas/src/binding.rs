//! Browser host binding: wires DOM events on the surface element to an
//! [`EngineCore`] and performs the [`Action`]s it returns.
//!
//! Listeners and the frame callback hold only weak references to the shared
//! state, so dropping the [`SurfaceBinding`] tears everything down: listeners
//! are removed and any pending animation frame is cancelled.

#[cfg(test)]
#[path = "binding_test.rs"]
mod binding_test;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, Document, Event, EventTarget, HtmlElement, KeyboardEvent, PointerEvent, WheelEvent,
};

use crate::camera::{Camera, ScreenPoint, Viewport, WorldPoint};
use crate::config::EngineConfig;
use crate::engine::{Action, EngineCore};
use crate::frame_loop::FrameLoop;
use crate::input::{Button, Cursor, DeltaMode, Key, Modifiers, WheelDelta};
use crate::layers::{AnnotationPin, LayerTransform, PinPlacement, place_pins};

/// Error raised while wiring the engine into the page.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    /// A DOM call failed.
    #[error("{call} failed: {message}")]
    Dom { call: &'static str, message: String },
}

impl BindError {
    pub(crate) fn dom(call: &'static str, err: &JsValue) -> Self {
        Self::Dom { call, message: err.as_string().unwrap_or_else(|| format!("{err:?}")) }
    }
}

/// Host hooks invoked as the engine reports events.
pub struct HostCallbacks {
    /// A click landed on this world point.
    pub on_place: Box<dyn FnMut(WorldPoint)>,
    /// The camera changed.
    pub on_camera: Box<dyn FnMut(Camera)>,
    /// The focus animation converged on its target.
    pub on_focus_cleared: Box<dyn FnMut()>,
}

impl Default for HostCallbacks {
    fn default() -> Self {
        Self {
            on_place: Box::new(|_| {}),
            on_camera: Box::new(|_| {}),
            on_focus_cleared: Box::new(|| {}),
        }
    }
}

struct Shared {
    core: RefCell<EngineCore>,
    surface: HtmlElement,
    content_layer: Option<HtmlElement>,
    frames: FrameLoop,
    callbacks: RefCell<HostCallbacks>,
    pointer_id: Cell<Option<i32>>,
}

impl Shared {
    fn read_viewport(&self) -> Viewport {
        let rect = self.surface.get_bounding_client_rect();
        Viewport { left: rect.x(), top: rect.y(), width: rect.width(), height: rect.height() }
    }

    fn refresh_viewport(&self) {
        let viewport = self.read_viewport();
        self.core.borrow_mut().set_viewport(viewport);
    }

    fn local_point(&self, client_x: i32, client_y: i32) -> ScreenPoint {
        self.core.borrow().viewport().to_local(f64::from(client_x), f64::from(client_y))
    }

    fn perform(&self, actions: &[Action], event: Option<&Event>) {
        for action in actions {
            match *action {
                Action::PlaceAt(world) => self.with_callbacks(|cb| (cb.on_place)(world)),
                Action::SetCursor(cursor) => self.set_cursor(cursor),
                Action::CapturePointer => self.capture_pointer(),
                Action::ReleasePointer => self.release_pointer(),
                Action::PreventDefault => {
                    if let Some(event) = event {
                        event.prevent_default();
                    }
                }
                Action::RenderNeeded => self.render(),
                Action::RequestFrame => {
                    if let Err(err) = self.frames.request() {
                        warn!(%err, "focus animation frame not scheduled");
                    }
                }
                Action::CancelFrame => self.frames.cancel(),
                Action::FocusCleared => self.with_callbacks(|cb| (cb.on_focus_cleared)()),
            }
        }
    }

    fn render(&self) {
        let camera = self.core.borrow().camera();
        if let Some(layer) = &self.content_layer {
            let transform = LayerTransform::content(&camera).to_css();
            if let Err(err) = layer.style().set_property("transform", &transform) {
                warn!(error = ?err, "content layer transform not applied");
            }
        }
        self.with_callbacks(|cb| (cb.on_camera)(camera));
    }

    fn set_cursor(&self, cursor: Cursor) {
        if let Err(err) = self.surface.style().set_property("cursor", cursor.css()) {
            warn!(error = ?err, "cursor not applied");
        }
    }

    fn capture_pointer(&self) {
        let Some(id) = self.pointer_id.get() else {
            return;
        };
        if let Err(err) = self.surface.set_pointer_capture(id) {
            warn!(pointer_id = id, error = ?err, "setPointerCapture failed");
        }
    }

    fn release_pointer(&self) {
        let Some(id) = self.pointer_id.take() else {
            return;
        };
        if !self.surface.has_pointer_capture(id) {
            return;
        }
        if let Err(err) = self.surface.release_pointer_capture(id) {
            warn!(pointer_id = id, error = ?err, "releasePointerCapture failed");
        }
    }

    /// Run `f` against the host callbacks. A callback that re-enters the
    /// binding and triggers another callback is dropped with a warning.
    fn with_callbacks(&self, f: impl FnOnce(&mut HostCallbacks)) {
        match self.callbacks.try_borrow_mut() {
            Ok(mut callbacks) => f(&mut callbacks),
            Err(_) => warn!("re-entrant host callback skipped"),
        }
    }

    fn on_frame(&self) {
        self.frames.mark_fired();
        let viewport = self.read_viewport();
        let actions = self.core.borrow_mut().on_animation_frame_in(viewport);
        self.perform(&actions, None);
    }
}

/// A registered DOM listener, removed again on drop.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        passive: Option<bool>,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, BindError> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
        let result = match passive {
            Some(passive) => {
                let options = AddEventListenerOptions::new();
                options.set_passive(passive);
                target.add_event_listener_with_callback_and_add_event_listener_options(kind, callback, &options)
            }
            None => target.add_event_listener_with_callback(kind, callback),
        };
        result.map_err(|err| BindError::dom("addEventListener", &err))?;
        Ok(Self { target: target.clone(), kind, closure })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let callback: &js_sys::Function = self.closure.as_ref().unchecked_ref();
        if let Err(err) = self.target.remove_event_listener_with_callback(self.kind, callback) {
            warn!(kind = self.kind, error = ?err, "removeEventListener failed");
        }
    }
}

/// Whether a keyboard event is aimed at a text-entry control.
fn is_editable_target(event: &Event) -> bool {
    let Some(element) = event.target().and_then(|t| t.dyn_ref::<HtmlElement>().cloned()) else {
        return false;
    };
    matches!(element.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT") || element.is_content_editable()
}

fn wheel_modifiers(event: &WheelEvent) -> Modifiers {
    Modifiers {
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        alt: event.alt_key(),
        meta: event.meta_key(),
    }
}

/// Pointer to track after a press: the pressing pointer if the press started
/// a capture, otherwise whichever pointer is already captured.
fn captured_pointer(actions: &[Action], pointer_id: i32, current: Option<i32>) -> Option<i32> {
    if actions.contains(&Action::CapturePointer) { Some(pointer_id) } else { current }
}

/// Upgrade the weak state and run `f` with the event downcast to `E`.
fn handler<E: JsCast + 'static>(
    weak: &Weak<Shared>,
    f: impl Fn(&Shared, &E, &Event) + 'static,
) -> impl FnMut(Event) + 'static {
    let weak = weak.clone();
    move |event: Event| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        if let Some(typed) = event.dyn_ref::<E>() {
            f(&shared, typed, &event);
        }
    }
}

/// The engine attached to a live surface element.
pub struct SurfaceBinding {
    shared: Rc<Shared>,
    listeners: Vec<Listener>,
}

impl SurfaceBinding {
    /// Attach an engine to `surface`.
    ///
    /// `content_layer`, when given, receives the camera's CSS transform on
    /// every camera change. Pointer, context-menu and wheel listeners go on
    /// the surface (wheel registered non-passive so page scrolling can be
    /// suppressed); key and blur listeners go on the window; visibility
    /// changes are watched on the document.
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] if the page has no window or document or a
    /// listener cannot be registered.
    pub fn attach(
        surface: HtmlElement,
        content_layer: Option<HtmlElement>,
        config: EngineConfig,
        callbacks: HostCallbacks,
    ) -> Result<Self, BindError> {
        let window = web_sys::window().ok_or(BindError::NoWindow)?;
        let document = window.document().ok_or(BindError::NoDocument)?;

        let shared = Rc::new(Shared {
            core: RefCell::new(EngineCore::with_config(config)),
            surface: surface.clone(),
            content_layer,
            frames: FrameLoop::new(window.clone()),
            callbacks: RefCell::new(callbacks),
            pointer_id: Cell::new(None),
        });
        shared.refresh_viewport();

        let weak = Rc::downgrade(&shared);
        {
            let weak = weak.clone();
            shared.frames.set_callback(Closure::wrap(Box::new(move |_ts: f64| {
                if let Some(shared) = weak.upgrade() {
                    shared.on_frame();
                }
            }) as Box<dyn FnMut(f64)>));
        }

        let listeners = Self::listen(&weak, &surface, &window, &document)?;
        shared.render();
        debug!(listeners = listeners.len(), "surface attached");
        Ok(Self { shared, listeners })
    }

    fn listen(
        weak: &Weak<Shared>,
        surface: &HtmlElement,
        window: &web_sys::Window,
        document: &Document,
    ) -> Result<Vec<Listener>, BindError> {
        let doc = document.clone();
        Ok(vec![
            Listener::attach(
                surface,
                "pointerdown",
                None,
                handler(weak, |s, e: &PointerEvent, ev| {
                    s.refresh_viewport();
                    let point = s.local_point(e.client_x(), e.client_y());
                    let actions = s.core.borrow_mut().on_pointer_down(point, Button::from_dom(e.button()));
                    s.pointer_id.set(captured_pointer(&actions, e.pointer_id(), s.pointer_id.get()));
                    s.perform(&actions, Some(ev));
                }),
            )?,
            Listener::attach(
                surface,
                "pointermove",
                None,
                handler(weak, |s, e: &PointerEvent, ev| {
                    let point = s.local_point(e.client_x(), e.client_y());
                    let actions = s.core.borrow_mut().on_pointer_move(point);
                    s.perform(&actions, Some(ev));
                }),
            )?,
            Listener::attach(
                surface,
                "pointerup",
                None,
                handler(weak, |s, e: &PointerEvent, ev| {
                    let point = s.local_point(e.client_x(), e.client_y());
                    let actions = s.core.borrow_mut().on_pointer_up(point, Button::from_dom(e.button()));
                    s.perform(&actions, Some(ev));
                }),
            )?,
            Listener::attach(
                surface,
                "pointercancel",
                None,
                handler(weak, |s, _: &PointerEvent, ev| {
                    let actions = s.core.borrow_mut().on_pointer_cancel();
                    s.perform(&actions, Some(ev));
                }),
            )?,
            Listener::attach(
                surface,
                "lostpointercapture",
                None,
                handler(weak, |s, _: &PointerEvent, ev| {
                    let actions = s.core.borrow_mut().on_pointer_cancel();
                    s.perform(&actions, Some(ev));
                }),
            )?,
            Listener::attach(
                surface,
                "contextmenu",
                None,
                handler(weak, |s, _: &Event, ev| {
                    let actions = s.core.borrow_mut().on_context_menu();
                    s.perform(&actions, Some(ev));
                }),
            )?,
            Listener::attach(
                surface,
                "wheel",
                Some(false),
                handler(weak, |s, e: &WheelEvent, ev| {
                    s.refresh_viewport();
                    let point = s.local_point(e.client_x(), e.client_y());
                    let delta = WheelDelta {
                        dx: e.delta_x(),
                        dy: e.delta_y(),
                        mode: DeltaMode::from_dom(e.delta_mode()),
                    };
                    let actions = s.core.borrow_mut().on_wheel(point, delta, wheel_modifiers(e));
                    s.perform(&actions, Some(ev));
                }),
            )?,
            Listener::attach(
                window,
                "keydown",
                None,
                handler(weak, |s, e: &KeyboardEvent, ev| {
                    let key = Key::new(e.key());
                    let actions = s.core.borrow_mut().on_key_down(&key, e.repeat(), is_editable_target(ev));
                    s.perform(&actions, Some(ev));
                }),
            )?,
            Listener::attach(
                window,
                "keyup",
                None,
                handler(weak, |s, e: &KeyboardEvent, ev| {
                    let key = Key::new(e.key());
                    let actions = s.core.borrow_mut().on_key_up(&key, is_editable_target(ev));
                    s.perform(&actions, Some(ev));
                }),
            )?,
            Listener::attach(
                window,
                "blur",
                None,
                handler(weak, |s, _: &Event, _| {
                    let actions = s.core.borrow_mut().on_blur();
                    s.perform(&actions, None);
                }),
            )?,
            Listener::attach(
                document,
                "visibilitychange",
                None,
                handler(weak, move |s, _: &Event, _| {
                    if !doc.hidden() {
                        return;
                    }
                    let actions = s.core.borrow_mut().on_blur();
                    s.perform(&actions, None);
                }),
            )?,
        ])
    }

    /// Re-read the surface's bounding rectangle (call after layout changes).
    pub fn refresh_viewport(&self) {
        self.shared.refresh_viewport();
    }

    /// Animate the camera until `target` is centered.
    pub fn focus_on(&self, target: WorldPoint) {
        self.shared.refresh_viewport();
        let actions = self.shared.core.borrow_mut().focus_on(target);
        self.shared.perform(&actions, None);
    }

    /// Stop any focus animation where it is.
    pub fn clear_focus(&self) {
        let actions = self.shared.core.borrow_mut().clear_focus();
        self.shared.perform(&actions, None);
    }

    /// Jump to `camera` without animating. Zoom is clamped into range.
    pub fn set_camera(&self, camera: Camera) {
        self.shared.core.borrow_mut().set_camera(camera);
        self.shared.render();
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.shared.core.borrow().camera()
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.shared.core.borrow().cursor()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.shared.core.borrow().is_animating()
    }

    /// Overlay positions for annotation pins under the current camera.
    #[must_use]
    pub fn place_pins(&self, pins: &[AnnotationPin]) -> Vec<PinPlacement> {
        place_pins(pins, &self.camera())
    }
}

impl Drop for SurfaceBinding {
    fn drop(&mut self) {
        self.listeners.clear();
        self.shared.frames.cancel();
        self.shared.release_pointer();
        debug!("surface detached");
    }
}
