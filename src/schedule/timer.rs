use std::collections::{BTreeMap, HashMap};

use crate::foundation::core::Millis;

/// Handle to an armed timer. Stays valid across re-arms of a repeating timer.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TimerId(pub u64);

/// A timer that came due, handed back to the owner for dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct Fired<T> {
    pub id: TimerId,
    pub at: Millis,
    pub task: T,
}

#[derive(Clone, Debug)]
struct Entry<T> {
    id: TimerId,
    repeat_ms: Option<u64>,
    task: T,
}

/// Virtual-time scheduler for one-shot and repeating callbacks.
///
/// Callbacks are plain task values: the queue never runs code itself. The owner drains due
/// timers with [`TimerQueue::pop_due`] and dispatches each one to completion before asking
/// for the next, which is what makes cancel-then-rearm inside a handler atomic.
///
/// Ordering: earliest deadline first; timers sharing a deadline fire in arming order.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Millis,
    next_id: u64,
    next_seq: u64,
    queue: BTreeMap<(Millis, u64), Entry<T>>,
    slots: HashMap<TimerId, (Millis, u64)>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Millis::ZERO,
            next_id: 0,
            next_seq: 0,
            queue: BTreeMap::new(),
            slots: HashMap::new(),
        }
    }

    /// Current scheduler time: the deadline of the last fired timer, or the last explicit
    /// [`TimerQueue::advance_clock`].
    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn schedule_once(&mut self, delay_ms: u64, task: T) -> TimerId {
        self.arm(delay_ms, None, task)
    }

    /// Arm a timer that re-fires every `interval_ms` until cancelled.
    ///
    /// A zero interval is raised to 1ms so a repeating timer can never starve the queue.
    pub fn schedule_repeating(&mut self, interval_ms: u64, task: T) -> TimerId {
        let interval_ms = interval_ms.max(1);
        self.arm(interval_ms, Some(interval_ms), task)
    }

    /// Cancel a pending timer. Returns `false` if it already fired (one-shot) or was
    /// cancelled before; calling it redundantly is harmless.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let Some(key) = self.slots.remove(&id) else {
            return false;
        };
        self.queue.remove(&key);
        tracing::trace!(timer = id.0, "timer cancelled");
        true
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.slots.len()
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Move the clock forward without firing anything. Never moves it backwards.
    pub fn advance_clock(&mut self, to: Millis) {
        self.now = self.now.max(to);
    }

    fn arm(&mut self, delay_ms: u64, repeat_ms: Option<u64>, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = self.now.after(delay_ms);
        self.insert(deadline, Entry { id, repeat_ms, task });
        tracing::trace!(timer = id.0, deadline = deadline.0, repeat_ms, "timer armed");
        id
    }

    fn insert(&mut self, deadline: Millis, entry: Entry<T>) {
        let key = (deadline, self.next_seq);
        self.next_seq += 1;
        self.slots.insert(entry.id, key);
        self.queue.insert(key, entry);
    }
}

impl<T: Clone> TimerQueue<T> {
    /// Remove and return the earliest timer due at or before `until`, advancing the clock to
    /// its deadline. Repeating timers are re-armed one interval after the deadline before
    /// being returned, so the handler may still cancel them.
    pub fn pop_due(&mut self, until: Millis) -> Option<Fired<T>> {
        let (&key, _) = self.queue.iter().next()?;
        let (deadline, _) = key;
        if deadline > until {
            return None;
        }
        let entry = self.queue.remove(&key)?;
        self.slots.remove(&entry.id);
        self.now = self.now.max(deadline);

        let fired = Fired {
            id: entry.id,
            at: deadline,
            task: entry.task.clone(),
        };
        if let Some(interval) = entry.repeat_ms {
            self.insert(deadline.after(interval), entry);
        }
        Some(fired)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/timer.rs"]
mod tests;
