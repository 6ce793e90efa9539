use crate::foundation::core::Millis;

/// Handle returned by [`FrameQueue::request`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameRequestId(pub u64);

/// Display-refresh callback queue.
///
/// Frames fall on multiples of the refresh interval. A request made at time `t` runs on the
/// first frame strictly after `t`; requests made while a frame is being dispatched land on
/// the following frame, never the current one.
#[derive(Debug)]
pub struct FrameQueue<T> {
    interval_ms: u64,
    next_id: u64,
    requests: Vec<(FrameRequestId, T)>,
}

impl<T> FrameQueue<T> {
    /// `interval_ms` must be positive (validated by the stage configuration); zero is
    /// raised to 1.
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            next_id: 0,
            requests: Vec::new(),
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn request(&mut self, task: T) -> FrameRequestId {
        let id = FrameRequestId(self.next_id);
        self.next_id += 1;
        self.requests.push((id, task));
        id
    }

    pub fn cancel(&mut self, id: FrameRequestId) -> bool {
        let before = self.requests.len();
        self.requests.retain(|(rid, _)| *rid != id);
        before != self.requests.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.requests.is_empty()
    }

    /// Time of the next frame after `now`, if anything is waiting for one.
    pub fn next_frame_after(&self, now: Millis) -> Option<Millis> {
        if self.requests.is_empty() {
            return None;
        }
        let k = now.0 / self.interval_ms + 1;
        Some(Millis(k.saturating_mul(self.interval_ms)))
    }

    /// Take every request queued so far, in request order.
    pub fn take_frame(&mut self) -> Vec<(FrameRequestId, T)> {
        std::mem::take(&mut self.requests)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/frame.rs"]
mod tests;
