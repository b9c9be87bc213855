use funding_chart::data_types::{Lookback, TimeBounds, ViewportConfig, ZoomFactors};
use funding_chart::view_controller::{ViewportController, ZoomDirection};

const HOUR: i64 = 3_600_000;

fn thirty_days() -> ViewportController {
    let config = ViewportConfig {
        min_window_ms: (3 * HOUR) as f64,
        lookback: Lookback::Week,
        zoom: ZoomFactors::default(),
    };
    ViewportController::new(TimeBounds::new(0, 720 * HOUR), config)
}

fn small(min_window_ms: f64) -> ViewportController {
    let config = ViewportConfig {
        min_window_ms,
        lookback: Lookback::Custom { ms: 50_000 },
        zoom: ZoomFactors::default(),
    };
    ViewportController::new(TimeBounds::new(0, 100_000), config)
}

#[test]
fn test_default_domain_uses_lookback() {
    let vc = thirty_days();
    let d = vc.domain();
    assert!(vc.is_default());
    assert_eq!(d.end, (720 * HOUR) as f64);
    assert_eq!(d.start, ((720 - 168) * HOUR) as f64);
}

#[test]
fn test_default_domain_clipped_to_bounds() {
    let config = ViewportConfig {
        lookback: Lookback::Month,
        ..ViewportConfig::default()
    };
    let vc = ViewportController::new(TimeBounds::new(0, 48 * HOUR), config);
    let d = vc.domain();
    assert_eq!(d.start, 0.0);
    assert_eq!(d.end, (48 * HOUR) as f64);
}

#[test]
fn test_set_domain_underflow_scenario() {
    let mut vc = thirty_days();
    let w = vc.set_domain(-1000.0, 500.0);
    // Width 1500 is below the 3h minimum, so the minimum wins.
    assert_eq!(w.start, 0.0);
    assert_eq!(w.end, (3 * HOUR) as f64);
    assert!(!vc.is_default());
}

#[test]
fn test_set_domain_inverted_input() {
    let mut vc = small(1000.0);
    let w = vc.set_domain(30_000.0, 10_000.0);
    assert_eq!(w.start, 10_000.0);
    assert_eq!(w.end, 30_000.0);
}

#[test]
fn test_set_domain_overflow_slides_back() {
    let mut vc = small(1000.0);
    let w = vc.set_domain(95_000.0, 115_000.0);
    assert_eq!(w.start, 80_000.0);
    assert_eq!(w.end, 100_000.0);
}

#[test]
fn test_set_domain_wider_than_bounds_is_full() {
    let mut vc = small(1000.0);
    let w = vc.set_domain(-50_000.0, 500_000.0);
    assert_eq!(w.start, 0.0);
    assert_eq!(w.end, 100_000.0);
}

#[test]
fn test_set_domain_idempotent() {
    let mut vc = small(1000.0);
    for (a, b) in [(-10.0, 20.0), (40_000.0, 40_100.0), (99_999.0, 50.0), (70_000.0, 250_000.0)] {
        let first = vc.set_domain(a, b);
        let second = vc.set_domain(first.start, first.end);
        assert_eq!(first, second, "not idempotent for ({}, {})", a, b);
    }
}

#[test]
fn test_wheel_zoom_focal_scenario() {
    let mut vc = small(1000.0);
    vc.set_domain(0.0, 10_000.0);
    let w = vc.zoom_by(0.8, 0.2);
    assert_eq!(w.start, 400.0);
    assert_eq!(w.end, 8400.0);
}

#[test]
fn test_zoom_keeps_focal_time_fixed() {
    let mut vc = small(1000.0);
    vc.set_domain(20_000.0, 60_000.0);
    let before = vc.domain().time_at(0.3);
    let after = vc.zoom_by(0.5, 0.3);
    assert!((after.time_at(0.3) - before).abs() < 1e-6);
    assert!((after.span() - 20_000.0).abs() < 1e-6);
}

#[test]
fn test_button_zoom_in_then_out_round_trip() {
    let config = ViewportConfig {
        min_window_ms: 1000.0,
        lookback: Lookback::Custom { ms: 40_000 },
        zoom: ZoomFactors {
            button_in: 0.8,
            button_out: 1.25,
            ..ZoomFactors::default()
        },
    };
    let mut vc = ViewportController::new(TimeBounds::new(0, 100_000), config);
    vc.set_domain(30_000.0, 70_000.0);
    let original = vc.domain().span();
    vc.zoom(ZoomDirection::In, 0.5);
    let w = vc.zoom(ZoomDirection::Out, 0.5);
    assert!((w.span() - original).abs() < 1e-6);
}

#[test]
fn test_zoom_in_stops_at_min_window() {
    let mut vc = small(5000.0);
    vc.set_domain(40_000.0, 50_000.0);
    for _ in 0..20 {
        vc.zoom(ZoomDirection::In, 0.5);
    }
    assert_eq!(vc.domain().span(), 5000.0);
}

#[test]
fn test_zoom_out_stops_at_bounds() {
    let mut vc = small(1000.0);
    vc.set_domain(40_000.0, 50_000.0);
    for _ in 0..30 {
        vc.zoom(ZoomDirection::Out, 0.9);
    }
    let d = vc.domain();
    assert_eq!(d.start, 0.0);
    assert_eq!(d.end, 100_000.0);
}

#[test]
fn test_pan_sticks_at_boundary_without_shrinking() {
    let mut vc = small(1000.0);
    vc.set_domain(10_000.0, 30_000.0);

    let w = vc.pan(-50_000.0);
    assert_eq!(w.start, 0.0);
    assert_eq!(w.end, 20_000.0);

    let w = vc.pan(500_000.0);
    assert_eq!(w.start, 80_000.0);
    assert_eq!(w.end, 100_000.0);
}

#[test]
fn test_pan_ratio_and_pixels() {
    let mut vc = small(1000.0);
    vc.set_domain(40_000.0, 50_000.0);

    let w = vc.pan_ratio(0.5);
    assert_eq!(w.start, 45_000.0);

    // Dragging right by a quarter of the width shows earlier data.
    let w = vc.pan_pixels(100.0, 400.0);
    assert_eq!(w.start, 42_500.0);
    assert_eq!(w.end, 52_500.0);

    let unchanged = vc.pan_pixels(100.0, 0.0);
    assert_eq!(unchanged, w);
}

#[test]
fn test_reset_returns_to_default() {
    let mut vc = thirty_days();
    let default = vc.domain();
    vc.zoom(ZoomDirection::In, 0.5);
    assert_ne!(vc.domain(), default);
    vc.reset();
    assert!(vc.is_default());
    assert_eq!(vc.domain(), default);
}

#[test]
fn test_set_lookback_resets() {
    let mut vc = thirty_days();
    vc.pan(-(10 * HOUR) as f64);
    vc.set_lookback(Lookback::Day);
    assert!(vc.is_default());
    assert_eq!(vc.domain().span(), (24 * HOUR) as f64);
}

#[test]
fn test_rebound_reclamps_explicit_window() {
    let mut vc = small(1000.0);
    vc.set_domain(80_000.0, 100_000.0);
    vc.rebound(TimeBounds::new(0, 90_000));
    let d = vc.domain();
    assert_eq!(d.start, 70_000.0);
    assert_eq!(d.end, 90_000.0);
}

#[test]
fn test_focal_ratio_at() {
    assert_eq!(ViewportController::focal_ratio_at(50.0, 200.0), 0.25);
    assert_eq!(ViewportController::focal_ratio_at(-10.0, 200.0), 0.0);
    assert_eq!(ViewportController::focal_ratio_at(500.0, 200.0), 1.0);
    assert_eq!(ViewportController::focal_ratio_at(10.0, 0.0), 0.5);
}

#[test]
fn test_extreme_bounds_give_finite_domain() {
    let mut vc = ViewportController::new(
        TimeBounds::new(-9_000_000_000_000_000_000, 9_000_000_000_000_000_000),
        ViewportConfig::default(),
    );
    assert_eq!(vc.bounds().span(), 1.8e19);
    let d = vc.domain();
    assert!(d.start.is_finite() && d.end.is_finite());
    assert_eq!(d.end, 9e18);

    let zoomed = vc.zoom(ZoomDirection::Out, 0.5);
    assert!(zoomed.start.is_finite() && zoomed.end.is_finite());
    assert!(vc.bounds().contains(&zoomed));
}

#[test]
fn test_out_of_range_custom_lookback_does_not_panic() {
    let config = ViewportConfig {
        lookback: Lookback::Custom { ms: i64::MIN },
        ..ViewportConfig::default()
    };
    let vc = ViewportController::new(TimeBounds::new(0, 720 * HOUR), config);
    let d = vc.domain();
    // A zero lookback widens to the minimum window at the latest edge.
    assert_eq!(d.end, (720 * HOUR) as f64);
    assert_eq!(d.span(), (3 * HOUR) as f64);
}
