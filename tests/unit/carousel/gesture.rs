use super::*;

#[test]
fn threshold_is_exclusive() {
    assert_eq!(resolve_swipe(200.0, 150.0, 50.0), None);
    assert_eq!(resolve_swipe(200.0, 149.0, 50.0), Some(Step::Next));
    assert_eq!(resolve_swipe(150.0, 200.0, 50.0), None);
    assert_eq!(resolve_swipe(149.0, 200.0, 50.0), Some(Step::Prev));
}

#[test]
fn non_finite_positions_never_navigate() {
    assert_eq!(resolve_swipe(f64::NAN, 0.0, 50.0), None);
}

#[test]
fn tracker_consumes_its_start() {
    let mut t = SwipeTracker::default();
    assert_eq!(t.touch_end(0.0, 50.0), None);
    t.touch_start(300.0);
    assert_eq!(t.touch_end(100.0, 50.0), Some(Step::Next));
    assert_eq!(t.touch_end(100.0, 50.0), None);
}
