use super::*;

// =============================================================
// Pointer capture tracking
// =============================================================

#[test]
fn capturing_press_records_its_pointer() {
    let actions = [Action::CapturePointer, Action::SetCursor(Cursor::Panning)];
    assert_eq!(captured_pointer(&actions, 7, None), Some(7));
}

#[test]
fn capturing_press_replaces_stale_pointer() {
    assert_eq!(captured_pointer(&[Action::CapturePointer], 7, Some(2)), Some(7));
}

#[test]
fn plain_press_keeps_captured_pointer() {
    assert_eq!(captured_pointer(&[], 9, Some(3)), Some(3));
}

#[test]
fn plain_press_without_capture_tracks_nothing() {
    assert_eq!(captured_pointer(&[Action::PreventDefault], 9, None), None);
}
