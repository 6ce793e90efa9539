use crate::{
    foundation::core::ElementId,
    schedule::frame::{FrameQueue, FrameRequestId},
    surface::paint::{Paint, Transform},
    visibility::notifier::ViewportGeometry,
};

/// Frame callback requested by the parallax layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallaxFrame;

#[derive(Clone, Debug, PartialEq)]
pub struct ParallaxElement {
    pub id: ElementId,
    pub speed: f64,
    /// Offset last written to the element, if any.
    pub last_offset: Option<f64>,
}

/// Scroll-linked offsets, coalesced to one recomputation per frame.
#[derive(Debug, Default)]
pub struct ParallaxLayer {
    elements: Vec<ParallaxElement>,
    pending: Option<FrameRequestId>,
}

impl ParallaxLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element. Returns `false` if it is already registered.
    pub fn register(&mut self, id: ElementId, speed: f64) -> bool {
        if self.elements.iter().any(|e| e.id == id) {
            return false;
        }
        self.elements.push(ParallaxElement {
            id,
            speed,
            last_offset: None,
        });
        true
    }

    pub fn elements(&self) -> &[ParallaxElement] {
        &self.elements
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Scroll notification. Requests a recomputation unless one is already waiting for
    /// the next frame; returns whether a new request was made.
    pub fn on_scroll<T: From<ParallaxFrame>>(&mut self, frames: &mut FrameQueue<T>) -> bool {
        if self.elements.is_empty() || self.pending.is_some() {
            return false;
        }
        self.pending = Some(frames.request(ParallaxFrame.into()));
        tracing::trace!("parallax frame requested");
        true
    }

    /// Drop a pending recomputation, if any.
    pub fn cancel_pending<T>(&mut self, frames: &mut FrameQueue<T>) {
        if let Some(id) = self.pending.take() {
            frames.cancel(id);
        }
    }

    /// Recompute offsets for elements that overlap the viewport vertically. Elements fully
    /// outside keep their last offset.
    pub fn on_frame(&mut self, geometry: &impl ViewportGeometry) -> Vec<Paint> {
        self.pending = None;
        let viewport = geometry.viewport();
        let scrolled = viewport.scroll_y;
        let mut paints = Vec::new();
        for el in &mut self.elements {
            let Some(rect) = geometry.rect(el.id) else {
                continue;
            };
            let client = viewport.to_client(rect);
            if client.y1 > 0.0 && client.y0 < viewport.height {
                let px = -(scrolled * el.speed);
                el.last_offset = Some(px);
                paints.push(Paint::transform(el.id, Transform::TranslateY { px }));
            }
        }
        paints
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/parallax.rs"]
mod tests;
