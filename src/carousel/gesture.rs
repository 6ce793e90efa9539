use crate::focus::roving::Step;

/// Resolve a horizontal touch sequence into a navigation step.
///
/// Travel must exceed `threshold_px` strictly. Finger moving left (start > end) means
/// [`Step::Next`]; moving right means [`Step::Prev`].
pub fn resolve_swipe(start_x: f64, end_x: f64, threshold_px: f64) -> Option<Step> {
    let delta = start_x - end_x;
    if delta.is_nan() || delta.abs() <= threshold_px {
        return None;
    }
    Some(if delta > 0.0 { Step::Next } else { Step::Prev })
}

/// Records the start of a single-finger touch sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SwipeTracker {
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn touch_start(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Finish the sequence. A touch end with no recorded start resolves to nothing.
    pub fn touch_end(&mut self, x: f64, threshold_px: f64) -> Option<Step> {
        let start = self.start_x.take()?;
        resolve_swipe(start, x, threshold_px)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/gesture.rs"]
mod tests;
