use std::time::Duration;

use flightmap_core::animation::ViewTransition;
use flightmap_core::geo::GeoPoint;
use flightmap_core::viewpoint::Camera;

fn transition(ms: u64) -> ViewTransition {
    ViewTransition::new(
        Camera::new(GeoPoint::new(0.0, 0.0), 50_000_000.0),
        Camera::new(GeoPoint::new(30.0, 60.0), 50_000.0),
        Duration::from_millis(ms),
    )
}

#[test]
fn test_endpoints() {
    let t = transition(1000);
    assert_eq!(t.camera_at(Duration::ZERO), t.from);
    assert_eq!(t.camera_at(Duration::from_millis(1000)), t.to);
    assert_eq!(t.camera_at(Duration::from_secs(5)), t.to);
}

#[test]
fn test_midpoint_scale_is_geometric_mean() {
    let t = transition(1000);
    let mid = t.camera_at(Duration::from_millis(500));
    let expected = (50_000_000.0_f64 * 50_000.0).sqrt();
    assert!((mid.scale() - expected).abs() / expected < 1e-9);
    assert!((mid.center.x - (t.from.center.x + t.to.center.x) / 2.0).abs() < 1e-6);
}

#[test]
fn test_progress_is_monotonic() {
    let t = transition(1000);
    let mut last = f64::INFINITY;
    for ms in (0..=1000).step_by(50) {
        let res = t.camera_at(Duration::from_millis(ms)).resolution;
        assert!(res <= last + 1e-9);
        last = res;
    }
}

#[test]
fn test_zero_duration_jumps() {
    let t = transition(0);
    assert!(t.is_finished(Duration::ZERO));
    assert_eq!(t.camera_at(Duration::ZERO), t.to);
}

#[test]
fn test_is_finished() {
    let t = transition(1000);
    assert!(!t.is_finished(Duration::from_millis(999)));
    assert!(t.is_finished(Duration::from_millis(1000)));
}
