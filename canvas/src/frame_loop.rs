//! One-shot `requestAnimationFrame` scheduling with a cancel handle.
//!
//! The loop never reschedules itself; the frame callback decides whether to
//! request another frame. The outstanding handle is cancelled on drop so a
//! torn-down surface never receives a late tick.

use std::cell::{Cell, RefCell};

use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use crate::binding::BindError;

pub struct FrameLoop {
    window: Window,
    handle: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl FrameLoop {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window, handle: Cell::new(None), callback: RefCell::new(None) }
    }

    /// Install the per-frame callback. Replaces any previous one.
    pub fn set_callback(&self, callback: Closure<dyn FnMut(f64)>) {
        self.cancel();
        *self.callback.borrow_mut() = Some(callback);
    }

    /// Whether a frame has been requested and not yet delivered.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.handle.get().is_some()
    }

    /// Schedule the callback for the next frame. No-op if one is already pending.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Dom`] if no callback is installed or the browser
    /// refuses the request.
    pub fn request(&self) -> Result<(), BindError> {
        if self.is_pending() {
            return Ok(());
        }
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return Err(BindError::Dom {
                call: "requestAnimationFrame",
                message: "no frame callback installed".to_owned(),
            });
        };
        let id = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|err| BindError::dom("requestAnimationFrame", &err))?;
        self.handle.set(Some(id));
        Ok(())
    }

    /// Cancel the pending frame, if any.
    pub fn cancel(&self) {
        let Some(id) = self.handle.take() else {
            return;
        };
        if let Err(err) = self.window.cancel_animation_frame(id) {
            warn!(error = ?err, "cancelAnimationFrame failed");
        }
    }

    /// Record that the pending frame was delivered. Call first thing in the callback.
    pub fn mark_fired(&self) {
        self.handle.set(None);
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
