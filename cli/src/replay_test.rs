#![allow(clippy::float_cmp)]

use std::io::Cursor as IoCursor;

use canvas::camera::{Viewport, WorldPoint};
use canvas::config::EngineConfig;

use super::*;

fn run(session: &str) -> (EngineCore, Vec<ReplayStep>) {
    let mut core = EngineCore::new();
    let mut steps = Vec::new();
    replay(&mut core, IoCursor::new(session), |step| {
        steps.push(step.clone());
        Ok(())
    })
    .expect("session should replay");
    (core, steps)
}

#[test]
fn parse_line_skips_blank_and_comments() {
    assert!(parse_line("", 1).expect("blank").is_none());
    assert!(parse_line("   ", 2).expect("spaces").is_none());
    assert!(parse_line("# middle-drag pan", 3).expect("comment").is_none());
}

#[test]
fn parse_line_reads_event() {
    let event = parse_line(r#"{"type":"pointer_move","x":4,"y":5}"#, 1).expect("parse");
    assert_eq!(event, Some(InputEvent::PointerMove { x: 4.0, y: 5.0 }));
}

#[test]
fn parse_line_error_carries_line_number() {
    let err = parse_line(r#"{"type":"nope"}"#, 7).expect_err("should fail");
    assert!(matches!(err, CliError::Event { line: 7, .. }));
    assert!(err.to_string().starts_with("line 7:"));
}

#[test]
fn click_session_places_at_world_point() {
    let session = r#"
# plain click
{"type":"resize","width":800,"height":600}
{"type":"pointer_down","x":100,"y":200}
{"type":"pointer_up","x":100,"y":200}
"#;
    let (_, steps) = run(session);
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[2].line, 5);
    assert_eq!(steps[2].actions, vec![Action::PlaceAt(WorldPoint::new(100.0, 200.0))]);
}

#[test]
fn pan_session_reports_camera_per_step() {
    let session = concat!(
        r#"{"type":"pointer_down","x":100,"y":100,"button":"middle"}"#,
        "\n",
        r#"{"type":"pointer_move","x":150,"y":130}"#,
        "\n",
        r#"{"type":"pointer_up","x":150,"y":130,"button":"middle"}"#,
        "\n",
    );
    let (core, steps) = run(session);
    assert_eq!(steps[0].cursor, Cursor::Panning);
    assert_eq!(steps[1].camera, Camera::new(-50.0, -30.0, 1.0));
    assert_eq!(steps[2].cursor, Cursor::Default);
    assert_eq!(core.camera(), Camera::new(-50.0, -30.0, 1.0));
}

#[test]
fn replay_stops_at_bad_line() {
    let mut core = EngineCore::new();
    let session = "{\"type\":\"blur\"}\nnot json\n{\"type\":\"blur\"}\n";
    let mut seen = 0;
    let err = replay(&mut core, IoCursor::new(session), |_| {
        seen += 1;
        Ok(())
    })
    .expect_err("should fail");
    assert!(matches!(err, CliError::Event { line: 2, .. }));
    assert_eq!(seen, 1);
}

#[test]
fn settle_runs_focus_to_completion() {
    let mut core = EngineCore::with_config(EngineConfig::default());
    core.set_viewport(Viewport::new(800.0, 600.0));
    core.focus_on(WorldPoint::new(500.0, 500.0));

    let mut cleared = 0;
    let frames = settle(&mut core, MAX_SETTLE_FRAMES, |step| {
        cleared += step.actions.iter().filter(|a| **a == Action::FocusCleared).count();
        Ok(())
    })
    .expect("settle");
    assert!(frames > 1);
    assert_eq!(cleared, 1);
    assert!(!core.is_animating());
}

#[test]
fn settle_respects_frame_cap() {
    let mut core = EngineCore::new();
    core.focus_on(WorldPoint::new(500.0, 500.0));
    // Zero-size viewport: the animation waits forever.
    let frames = settle(&mut core, 5, |_| Ok(())).expect("settle");
    assert_eq!(frames, 5);
    assert!(core.is_animating());
}

#[test]
fn text_rendering_names_event_and_cursor() {
    let (_, steps) = run(r#"{"type":"key_down","key":" "}"#);
    let text = steps[0].to_text();
    assert!(text.contains("key_down"));
    assert!(text.contains("cursor=grab"));
}

#[test]
fn json_rendering_includes_actions() {
    let (_, steps) = run(r#"{"type":"pointer_down","x":0,"y":0,"button":"middle"}"#);
    let value = serde_json::to_value(&steps[0]).expect("serialize");
    assert_eq!(value["event"]["type"], "pointer_down");
    assert_eq!(value["actions"][0], "capture_pointer");
    assert_eq!(value["cursor"], "panning");
}
