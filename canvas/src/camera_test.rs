#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn screen_approx_eq(a: ScreenPoint, b: ScreenPoint) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn world_approx_eq(a: WorldPoint, b: WorldPoint) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Points ---

#[test]
fn screen_point_new() {
    let p = ScreenPoint::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn screen_point_distance_sq() {
    let a = ScreenPoint::new(0.0, 0.0);
    let b = ScreenPoint::new(3.0, 4.0);
    assert_eq!(a.distance_sq(b), 25.0);
    assert_eq!(b.distance_sq(a), 25.0);
}

#[test]
fn screen_point_distance_sq_to_self_is_zero() {
    let p = ScreenPoint::new(-7.5, 12.25);
    assert_eq!(p.distance_sq(p), 0.0);
}

#[test]
fn world_point_equality() {
    assert_eq!(WorldPoint::new(1.0, 2.0), WorldPoint::new(1.0, 2.0));
    assert_ne!(WorldPoint::new(1.0, 2.0), WorldPoint::new(1.0, 3.0));
}

// --- Camera defaults ---

#[test]
fn camera_default_is_identity() {
    let cam = Camera::default();
    assert_eq!(cam.x, 0.0);
    assert_eq!(cam.y, 0.0);
    assert_eq!(cam.zoom, 1.0);
}

#[test]
fn camera_new_clamps_zoom() {
    assert_eq!(Camera::new(0.0, 0.0, 100.0).zoom, 3.0);
    assert_eq!(Camera::new(0.0, 0.0, 0.0).zoom, 0.25);
    assert_eq!(Camera::new(0.0, 0.0, -2.0).zoom, 0.25);
}

#[test]
fn zoom_accessor_reads_clamped_value() {
    assert_eq!(Camera::new(5.0, 5.0, 2.0).zoom(), 2.0);
    assert_eq!(Camera::new(5.0, 5.0, 9.0).zoom(), 3.0);
}

#[test]
fn deserialized_camera_zoom_is_clamped() {
    let cam: Camera = serde_json::from_str(r#"{"x":1.0,"y":2.0,"zoom":50.0}"#).unwrap();
    assert_eq!(cam, Camera::new(1.0, 2.0, 3.0));
}

#[test]
fn camera_new_leaves_position_unbounded() {
    let cam = Camera::new(-1.0e12, 4.0e15, 1.0);
    assert_eq!(cam.x, -1.0e12);
    assert_eq!(cam.y, 4.0e15);
}

// --- clamp_zoom ---

#[test]
fn clamp_zoom_inside_range_is_unchanged() {
    assert_eq!(clamp_zoom(1.5), 1.5);
}

#[test]
fn clamp_zoom_bounds_are_inclusive() {
    assert_eq!(clamp_zoom(0.25), 0.25);
    assert_eq!(clamp_zoom(3.0), 3.0);
}

#[test]
fn clamp_zoom_infinity_saturates() {
    assert_eq!(clamp_zoom(f64::INFINITY), 3.0);
    assert_eq!(clamp_zoom(f64::NEG_INFINITY), 0.25);
}

#[test]
fn clamp_zoom_nan_resets_to_one() {
    assert_eq!(clamp_zoom(f64::NAN), 1.0);
}

// --- screen_to_world ---

#[test]
fn screen_to_world_identity() {
    let cam = Camera::default();
    let world = cam.screen_to_world(ScreenPoint::new(50.0, 75.0));
    assert!(world_approx_eq(world, WorldPoint::new(50.0, 75.0)));
}

#[test]
fn screen_to_world_with_zoom() {
    let cam = Camera { x: 0.0, y: 0.0, zoom: 2.0 };
    let world = cam.screen_to_world(ScreenPoint::new(40.0, 80.0));
    assert!(world_approx_eq(world, WorldPoint::new(20.0, 40.0)));
}

#[test]
fn screen_to_world_with_offset() {
    let cam = Camera { x: 100.0, y: 50.0, zoom: 1.0 };
    let world = cam.screen_to_world(ScreenPoint::new(0.0, 0.0));
    assert!(world_approx_eq(world, WorldPoint::new(100.0, 50.0)));
}

#[test]
fn screen_to_world_with_offset_and_zoom() {
    let cam = Camera { x: 20.0, y: 10.0, zoom: 2.0 };
    // 20 + 30/2 = 35, 10 + 10/2 = 15
    let world = cam.screen_to_world(ScreenPoint::new(30.0, 10.0));
    assert!(world_approx_eq(world, WorldPoint::new(35.0, 15.0)));
}

#[test]
fn screen_to_world_negative_coords() {
    let cam = Camera { x: -5.0, y: 0.0, zoom: 0.5 };
    let world = cam.screen_to_world(ScreenPoint::new(-10.0, -20.0));
    assert!(world_approx_eq(world, WorldPoint::new(-25.0, -40.0)));
}

// --- world_to_screen ---

#[test]
fn world_to_screen_identity() {
    let cam = Camera::default();
    let screen = cam.world_to_screen(WorldPoint::new(50.0, 75.0));
    assert!(screen_approx_eq(screen, ScreenPoint::new(50.0, 75.0)));
}

#[test]
fn world_to_screen_with_offset_and_zoom() {
    let cam = Camera { x: 20.0, y: 10.0, zoom: 3.0 };
    // (25-20)*3 = 15, (15-10)*3 = 15
    let screen = cam.world_to_screen(WorldPoint::new(25.0, 15.0));
    assert!(screen_approx_eq(screen, ScreenPoint::new(15.0, 15.0)));
}

#[test]
fn world_to_screen_point_left_of_camera_is_negative() {
    let cam = Camera { x: 100.0, y: 100.0, zoom: 1.0 };
    let screen = cam.world_to_screen(WorldPoint::new(90.0, 95.0));
    assert!(screen_approx_eq(screen, ScreenPoint::new(-10.0, -5.0)));
}

// --- Round trip ---

#[test]
fn round_trip_screen_world_screen() {
    let cameras = [
        Camera::default(),
        Camera { x: 123.456, y: -789.012, zoom: 0.25 },
        Camera { x: -4.0e3, y: 2.5e3, zoom: 3.0 },
        Camera { x: 0.1, y: 0.2, zoom: 1.7 },
    ];
    let points = [
        ScreenPoint::new(0.0, 0.0),
        ScreenPoint::new(640.0, 360.0),
        ScreenPoint::new(-33.3, 1999.9),
    ];
    for cam in cameras {
        for p in points {
            let back = cam.world_to_screen(cam.screen_to_world(p));
            assert!(screen_approx_eq(back, p), "camera {cam:?} point {p:?} came back as {back:?}");
        }
    }
}

#[test]
fn screen_dist_to_world_divides_by_zoom() {
    let cam = Camera { x: 0.0, y: 0.0, zoom: 2.0 };
    assert!(approx_eq(cam.screen_dist_to_world(10.0), 5.0));
}

// --- origin_centering ---

#[test]
fn origin_centering_at_identity_zoom() {
    let cam = Camera::default();
    let vp = Viewport::new(800.0, 600.0);
    let origin = cam.origin_centering(WorldPoint::new(500.0, 500.0), &vp);
    assert!(world_approx_eq(origin, WorldPoint::new(100.0, 200.0)));
}

#[test]
fn origin_centering_puts_target_at_viewport_center() {
    let cam = Camera { x: 9.0, y: -3.0, zoom: 2.0 };
    let vp = Viewport::new(1024.0, 768.0);
    let target = WorldPoint::new(-40.0, 75.0);
    let origin = cam.origin_centering(target, &vp);
    let centered = Camera { x: origin.x, y: origin.y, zoom: cam.zoom };
    assert!(screen_approx_eq(centered.world_to_screen(target), vp.center()));
}

// --- Viewport ---

#[test]
fn viewport_center_is_half_size() {
    let vp = Viewport::new(800.0, 600.0);
    assert_eq!(vp.center(), ScreenPoint::new(400.0, 300.0));
}

#[test]
fn viewport_to_local_subtracts_offset() {
    let vp = Viewport { left: 240.0, top: 56.0, width: 800.0, height: 600.0 };
    assert_eq!(vp.to_local(340.0, 156.0), ScreenPoint::new(100.0, 100.0));
}

#[test]
fn viewport_degenerate_cases() {
    assert!(Viewport::new(0.0, 600.0).is_degenerate());
    assert!(Viewport::new(800.0, 0.0).is_degenerate());
    assert!(Viewport::new(-1.0, 600.0).is_degenerate());
    assert!(Viewport::new(f64::NAN, 600.0).is_degenerate());
    assert!(Viewport::new(f64::INFINITY, 600.0).is_degenerate());
    assert!(Viewport::default().is_degenerate());
    assert!(!Viewport::new(1.0, 1.0).is_degenerate());
}
