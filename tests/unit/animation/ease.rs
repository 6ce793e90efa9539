use super::*;

#[test]
fn endpoints_are_exact() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
    assert_eq!(ease_out_cubic(-3.0), 0.0);
    assert_eq!(ease_out_cubic(7.0), 1.0);
}

#[test]
fn front_loads_progress() {
    assert_eq!(ease_out_cubic(0.5), 0.875);
    assert!(ease_out_cubic(0.25) > 0.25);
}

#[test]
fn curve_is_monotonic() {
    let mut prev = ease_out_cubic(0.0);
    for i in 1..=20 {
        let v = ease_out_cubic(f64::from(i) / 20.0);
        assert!(v >= prev, "dipped at step {i}");
        prev = v;
    }
}
