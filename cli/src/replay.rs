//! Session replay: feed recorded input events through an `EngineCore`.
//!
//! A session is JSON lines, one `InputEvent` per line. Blank lines and lines
//! starting with `#` are skipped, so sessions can carry notes.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::io::BufRead;

use canvas::camera::Camera;
use canvas::engine::{Action, EngineCore};
use canvas::input::{Cursor, InputEvent};
use serde::Serialize;
use tracing::{debug, warn};

use crate::CliError;

/// Upper bound on frames delivered while settling a focus animation.
pub const MAX_SETTLE_FRAMES: usize = 10_000;

/// Engine state after one replayed event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayStep {
    /// 1-based line number of the event in the session, or 0 for settle frames.
    pub line: usize,
    pub event: InputEvent,
    pub actions: Vec<Action>,
    pub camera: Camera,
    pub cursor: Cursor,
}

impl ReplayStep {
    fn capture(core: &EngineCore, line: usize, event: InputEvent, actions: Vec<Action>) -> Self {
        Self { line, event, actions, camera: core.camera(), cursor: core.cursor() }
    }

    /// One-line human-readable rendering.
    #[must_use]
    pub fn to_text(&self) -> String {
        let actions = self.actions.iter().map(|a| format!("{a:?}")).collect::<Vec<_>>().join(", ");
        format!(
            "{:>4} {:<14} camera=({:.2}, {:.2}) zoom={:.3} cursor={} [{}]",
            self.line,
            self.event.kind(),
            self.camera.x,
            self.camera.y,
            self.camera.zoom(),
            self.cursor.css(),
            actions
        )
    }
}

/// Parse one session line. Returns `None` for blank and comment lines.
///
/// # Errors
///
/// Returns [`CliError::Event`] when the line is not a valid event.
pub fn parse_line(raw: &str, line: usize) -> Result<Option<InputEvent>, CliError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some).map_err(|source| CliError::Event { line, source })
}

/// Replay every event from `reader`, handing each resulting step to `sink`.
/// Returns the number of events replayed.
///
/// # Errors
///
/// Stops at the first unreadable or unparsable line, or the first sink error.
pub fn replay<R: BufRead>(
    core: &mut EngineCore,
    reader: R,
    mut sink: impl FnMut(&ReplayStep) -> Result<(), CliError>,
) -> Result<usize, CliError> {
    let mut replayed = 0;
    for (index, raw) in reader.lines().enumerate() {
        let line = index + 1;
        let Some(event) = parse_line(&raw?, line)? else {
            continue;
        };
        let actions = core.handle(&event);
        debug!(line, kind = event.kind(), actions = actions.len(), "event replayed");
        sink(&ReplayStep::capture(core, line, event, actions))?;
        replayed += 1;
    }
    Ok(replayed)
}

/// Deliver animation frames until none is pending or `max_frames` is reached.
/// Returns the number of frames delivered.
///
/// # Errors
///
/// Propagates the first sink error.
pub fn settle(
    core: &mut EngineCore,
    max_frames: usize,
    mut sink: impl FnMut(&ReplayStep) -> Result<(), CliError>,
) -> Result<usize, CliError> {
    let mut frames = 0;
    while core.frame_pending() {
        if frames == max_frames {
            warn!(max_frames, "focus animation did not settle");
            break;
        }
        let actions = core.on_animation_frame();
        sink(&ReplayStep::capture(core, 0, InputEvent::Frame, actions))?;
        frames += 1;
    }
    Ok(frames)
}
