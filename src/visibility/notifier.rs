use std::collections::HashSet;

use crate::foundation::{
    core::{ElementId, Rect, Viewport},
    error::{MotionError, MotionResult},
};

/// Source of viewport geometry: the current viewport and each element's document-space box.
pub trait ViewportGeometry {
    fn viewport(&self) -> Viewport;
    /// Layout box in document coordinates, or `None` if the handle is unknown.
    fn rect(&self, id: ElementId) -> Option<Rect>;
}

/// Growth (positive) or shrink (negative) applied to the viewport before intersection tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RootMargin {
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub right: f64,
    #[serde(default)]
    pub bottom: f64,
    #[serde(default)]
    pub left: f64,
}

/// Fixed sensor configuration, shared by every handle one notifier watches.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisibilityConfig {
    /// Visible fraction in `[0, 1]` an element must reach to count as visible.
    pub threshold: f64,
    #[serde(default)]
    pub root_margin: RootMargin,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self::with_threshold(0.0)
    }
}

impl VisibilityConfig {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            root_margin: RootMargin::default(),
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(MotionError::config(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        let m = self.root_margin;
        if ![m.top, m.right, m.bottom, m.left].iter().all(|v| v.is_finite()) {
            return Err(MotionError::config("root margin must be finite"));
        }
        Ok(())
    }

    /// The trigger region in viewport coordinates.
    pub fn root_rect(&self, viewport: Viewport) -> Rect {
        let b = viewport.bounds();
        let m = self.root_margin;
        Rect::new(b.x0 - m.left, b.y0 - m.top, b.x1 + m.right, b.y1 + m.bottom)
    }

    /// Whether an element whose bounding client rect is `client` satisfies the threshold.
    pub fn is_visible(&self, client: Rect, viewport: Viewport) -> bool {
        visible_fraction(client, self.root_rect(viewport)).is_some_and(|f| f >= self.threshold)
    }
}

/// Fraction of `client` inside `root`, or `None` when they do not touch at all.
/// A zero-area element touching the root counts as fully visible.
pub(crate) fn visible_fraction(client: Rect, root: Rect) -> Option<f64> {
    let client = client.abs();
    let touches = client.x0 <= root.x1
        && client.x1 >= root.x0
        && client.y0 <= root.y1
        && client.y1 >= root.y0;
    if !touches || root.width() < 0.0 || root.height() < 0.0 {
        return None;
    }
    let area = client.area();
    if area <= 0.0 {
        return Some(1.0);
    }
    let overlap = client.intersect(root);
    Some((overlap.width().max(0.0) * overlap.height().max(0.0)) / area)
}

/// Notifies each watched handle at most once, the first time it becomes visible, and then
/// stops watching it.
#[derive(Debug)]
pub struct VisibilityNotifier {
    cfg: VisibilityConfig,
    watched: Vec<ElementId>,
    fired: HashSet<ElementId>,
}

impl VisibilityNotifier {
    pub fn new(cfg: VisibilityConfig) -> MotionResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            watched: Vec::new(),
            fired: HashSet::new(),
        })
    }

    pub fn config(&self) -> VisibilityConfig {
        self.cfg
    }

    /// Register interest. Returns `false` (and does nothing) when the handle is already
    /// watched or has already fired.
    pub fn watch(&mut self, id: ElementId) -> bool {
        if self.fired.contains(&id) || self.watched.contains(&id) {
            return false;
        }
        self.watched.push(id);
        true
    }

    /// Stop watching. Idempotent.
    pub fn unwatch(&mut self, id: ElementId) -> bool {
        let before = self.watched.len();
        self.watched.retain(|w| *w != id);
        before != self.watched.len()
    }

    pub fn is_watching(&self, id: ElementId) -> bool {
        self.watched.contains(&id)
    }

    pub fn has_fired(&self, id: ElementId) -> bool {
        self.fired.contains(&id)
    }

    pub fn watched_len(&self) -> usize {
        self.watched.len()
    }

    /// Evaluate every watched handle against the current geometry. Handles that became
    /// visible are returned in watch order and are unwatched for good.
    pub fn poll(&mut self, geometry: &impl ViewportGeometry) -> Vec<ElementId> {
        let viewport = geometry.viewport();
        let cfg = self.cfg;
        let mut newly = Vec::new();
        self.watched.retain(|&id| {
            let visible = geometry
                .rect(id)
                .is_some_and(|r| cfg.is_visible(viewport.to_client(r), viewport));
            if visible {
                newly.push(id);
            }
            !visible
        });
        self.fired.extend(newly.iter().copied());
        newly
    }
}

#[cfg(test)]
#[path = "../../tests/unit/visibility/notifier.rs"]
mod tests;
