//! Virtual-time timer queue
//!
//! Every delayed continuation on the page (fire-once timeouts and repeating
//! intervals) is stored as data in a [`TimerQueue`]. Time only moves when the
//! host advances it, so the same queue drives the browser (armed with a
//! single `setTimeout` for [`TimerQueue::next_due`]) and tests (which step
//! time explicitly).
//!
//! Firing order is by deadline, ties broken by scheduling order. While a
//! timer fires, [`TimerQueue::now`] equals its deadline, so anything the task
//! schedules is relative to the moment it fired rather than to the end of the
//! advance window.
//!
//! # Example
//!
//! ```
//! use folio_animation::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! timers.schedule(300, "fade");
//! timers.schedule(100, "show");
//!
//! let mut fired = Vec::new();
//! while let Some(timer) = timers.pop_due(500) {
//!     fired.push((timers.now(), timer.task));
//! }
//! timers.advance_to(500);
//!
//! assert_eq!(fired, vec![(100, "show"), (300, "fade")]);
//! assert_eq!(timers.now(), 500);
//! ```

use slotmap::{new_key_type, SlotMap};

/// Milliseconds of virtual time
pub type Millis = u64;

new_key_type! {
    /// Handle to a scheduled timer
    pub struct TimerId;
}

impl TimerId {
    /// Convert to raw u64 for storage outside the queue
    pub fn to_raw(self) -> u64 {
        slotmap::Key::data(&self).as_ffi()
    }

    /// Reconstruct from raw u64
    pub fn from_raw(raw: u64) -> Self {
        TimerId::from(slotmap::KeyData::from_ffi(raw))
    }
}

struct Timer<T> {
    due: Millis,
    seq: u64,
    /// Re-arm period for repeating timers
    interval: Option<Millis>,
    task: T,
}

/// A timer that has come due
#[derive(Debug, Clone, PartialEq)]
pub struct FiredTimer<T> {
    pub id: TimerId,
    pub due: Millis,
    pub task: T,
}

/// Deadline-ordered queue of pending tasks over a virtual clock
pub struct TimerQueue<T> {
    timers: SlotMap<TimerId, Timer<T>>,
    now: Millis,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for TimerQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerQueue")
            .field("now", &self.now)
            .field("pending", &self.timers.len())
            .field("next_due", &self.next_due())
            .finish()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            now: 0,
            next_seq: 0,
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    fn seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Run `task` once, `delay` ms from now
    pub fn schedule(&mut self, delay: Millis, task: T) -> TimerId {
        let seq = self.seq();
        self.timers.insert(Timer {
            due: self.now.saturating_add(delay),
            seq,
            interval: None,
            task,
        })
    }

    /// Run `task` every `interval` ms, first after one interval
    ///
    /// A zero interval is treated as 1ms.
    pub fn schedule_repeating(&mut self, interval: Millis, task: T) -> TimerId {
        let interval = interval.max(1);
        let seq = self.seq();
        self.timers.insert(Timer {
            due: self.now.saturating_add(interval),
            seq,
            interval: Some(interval),
            task,
        })
    }

    /// Cancel a pending timer; returns false if it already fired or was
    /// cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(id).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Earliest pending deadline
    pub fn next_due(&self) -> Option<Millis> {
        self.timers.values().map(|t| t.due).min()
    }

    /// Move the clock forward to `until` once every due timer has fired
    ///
    /// The clock never moves backwards.
    pub fn advance_to(&mut self, until: Millis) {
        self.now = self.now.max(until);
    }

    fn earliest_due(&self, until: Millis) -> Option<TimerId> {
        self.timers
            .iter()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(id, _)| id)
    }
}

impl<T: Clone> TimerQueue<T> {
    /// Take the earliest timer due at or before `until`
    ///
    /// The clock moves to the timer's deadline. Repeating timers are re-armed
    /// one interval later and keep their id.
    pub fn pop_due(&mut self, until: Millis) -> Option<FiredTimer<T>> {
        let id = self.earliest_due(until)?;
        let seq = self.seq();
        let timer = self.timers.get_mut(id)?;
        let due = timer.due;
        self.now = self.now.max(due);

        match timer.interval {
            Some(interval) => {
                timer.due = due.saturating_add(interval);
                timer.seq = seq;
                Some(FiredTimer {
                    id,
                    due,
                    task: timer.task.clone(),
                })
            }
            None => {
                let timer = self.timers.remove(id)?;
                Some(FiredTimer {
                    id,
                    due,
                    task: timer.task,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(timers: &mut TimerQueue<&'static str>, until: Millis) -> Vec<(Millis, &'static str)> {
        let mut fired = Vec::new();
        while let Some(timer) = timers.pop_due(until) {
            fired.push((timer.due, timer.task));
        }
        timers.advance_to(until);
        fired
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(200, "b");
        timers.schedule(100, "a");
        timers.schedule(200, "c");

        assert_eq!(timers.next_due(), Some(100));
        assert!(drain(&mut timers, 99).is_empty());
        assert_eq!(drain(&mut timers, 200), vec![(100, "a"), (200, "b"), (200, "c")]);
        assert!(timers.is_empty());
        assert_eq!(timers.now(), 200);
    }

    #[test]
    fn test_schedule_relative_to_firing_time() {
        let mut timers = TimerQueue::new();
        timers.schedule(100, "first");

        let fired = timers.pop_due(1000).unwrap();
        assert_eq!(fired.task, "first");
        assert_eq!(timers.now(), 100);

        timers.schedule(50, "second");
        assert_eq!(timers.next_due(), Some(150));
    }

    #[test]
    fn test_repeating_until_cancelled() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule_repeating(100, "tick");

        assert_eq!(drain(&mut timers, 350).len(), 3);
        assert!(timers.is_pending(id));
        assert_eq!(timers.next_due(), Some(400));

        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(drain(&mut timers, 1000).is_empty());
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut timers = TimerQueue::new();
        timers.schedule_repeating(0, "spin");
        assert_eq!(drain(&mut timers, 5).len(), 5);
    }

    #[test]
    fn test_clock_never_moves_backwards() {
        let mut timers: TimerQueue<()> = TimerQueue::new();
        timers.advance_to(500);
        timers.advance_to(100);
        assert_eq!(timers.now(), 500);
    }
}
