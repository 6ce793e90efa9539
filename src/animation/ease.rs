/// Cubic ease-out, `1 - (1 - t)^3`: fast start, gentle landing. `t` is clamped to `[0, 1]`,
/// so both endpoints are exact.
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t.clamp(0.0, 1.0)).powi(3)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
