use super::*;

#[test]
fn zero_frames_is_rejected() {
    assert!(Tween::new(0).is_err());
}

#[test]
fn first_frame_returns_start_exactly() {
    let tw = Tween::new(50).unwrap();
    assert_eq!(tw.lerp(13.0, 4.0, FrameIndex(0)), 13.0);
    assert_eq!(tw.lerp(-38.0, 252.0, FrameIndex(0)), -38.0);
    let p = tw.point(Point::new(290.0, 293.0), Point::new(252.0, 364.0), FrameIndex(0));
    assert_eq!(p, Point::new(290.0, 293.0));
}

#[test]
fn last_frame_is_close_to_end_but_not_past_it() {
    let tw = Tween::new(50).unwrap();
    let last = FrameIndex(49);
    let v = tw.lerp(0.0, 100.0, last);
    assert!(v < 100.0);
    assert!((100.0 - v).abs() < 0.05, "got {v}");
    assert!((100.0 - v) < (v - 0.0));

    let w = tw.lerp(13.0, 4.0, last);
    assert!((w - 4.0).abs() < 1e-2, "got {w}");
}

#[test]
fn factor_is_monotonic_over_frames() {
    let tw = Tween::new(50).unwrap();
    let factors: Vec<f64> = tw.frames().iter().map(|f| tw.factor(f)).collect();
    assert_eq!(factors.len(), 50);
    assert!(factors.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(factors[0], 0.0);
}

#[test]
fn linear_ease_is_proportional() {
    let tw = Tween::new(10).unwrap().with_ease(Ease::Linear);
    assert!((tw.lerp(0.0, 10.0, FrameIndex(5)) - 5.0).abs() < 1e-12);
}

#[test]
fn span_shrinks_from_geo_to_map() {
    let tw = Tween::new(50).unwrap();
    let width = Span::new(13.0, 4.0);
    assert_eq!(width.at(&tw, FrameIndex(0)), 13.0);
    assert!(width.at(&tw, FrameIndex(25)) < 13.0);
    assert!(width.at(&tw, FrameIndex(25)) > 4.0);
    assert!(width.at(&tw, FrameIndex(49)) >= 4.0);
}

#[test]
fn span_width_validation() {
    assert!(Span::new(1.0, 0.0).is_valid_width());
    assert!(!Span::new(-1.0, 2.0).is_valid_width());
    assert!(!Span::new(f64::NAN, 2.0).is_valid_width());
}
