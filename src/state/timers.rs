//! Timers - Cooperative interval scheduler on an explicit clock
//!
//! The event loop owns time. It calls [`TimerQueue::advance_to`] with the
//! milliseconds elapsed since mount and every interval whose deadline has
//! passed fires, in deadline order.
//!
//! # Pattern
//!
//! - `set_interval` returns an [`IntervalHandle`]; dropping it cancels
//! - A callback returns `ControlFlow::Break(())` to end its own interval
//! - Late ticks are delivered, never skipped: tick N is the N-th call
//!
//! # Example
//!
//! ```
//! use std::ops::ControlFlow;
//! use spark_folio::state::timers::TimerQueue;
//!
//! let timers = TimerQueue::new();
//! let handle = timers.set_interval(30, || ControlFlow::Continue(()));
//!
//! assert_eq!(timers.advance_to(95), 3);
//! handle.cancel();
//! assert_eq!(timers.advance_to(500), 0);
//! ```

use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::{Rc, Weak};

use tracing::trace;

/// Interval callback. `Break` ends the interval.
pub type TickFn = Box<dyn FnMut() -> ControlFlow<()>>;

/// Smallest period an interval can have.
pub const MIN_PERIOD_MS: u64 = 1;

// =============================================================================
// QUEUE STATE
// =============================================================================

struct Entry {
    id: u64,
    period: u64,
    next_due: u64,
    /// Taken out while the callback runs.
    callback: Option<TickFn>,
}

#[derive(Default)]
struct QueueState {
    now: u64,
    next_id: u64,
    entries: Vec<Entry>,
}

impl QueueState {
    fn position(&self, id: u64) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Earliest due entry at or before `limit`, ties broken by registration.
    fn next_due(&self, limit: u64) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.callback.is_some() && e.next_due <= limit)
            .min_by_key(|(_, e)| (e.next_due, e.id))
            .map(|(i, _)| i)
    }
}

// =============================================================================
// TIMER QUEUE
// =============================================================================

/// Single-threaded interval scheduler.
///
/// Cloning gives another handle to the same queue.
#[derive(Clone, Default)]
pub struct TimerQueue {
    state: Rc<RefCell<QueueState>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value in milliseconds.
    pub fn now(&self) -> u64 {
        self.state.borrow().now
    }

    /// Register a repeating callback. The first tick is due one period from now.
    ///
    /// # Arguments
    ///
    /// * `period_ms` - Interval length. Zero is clamped to [`MIN_PERIOD_MS`].
    /// * `callback` - Called once per tick until it breaks or is cancelled.
    pub fn set_interval<F>(&self, period_ms: u64, callback: F) -> IntervalHandle
    where
        F: FnMut() -> ControlFlow<()> + 'static,
    {
        let period = period_ms.max(MIN_PERIOD_MS);
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let next_due = state.now + period;
        state.entries.push(Entry {
            id,
            period,
            next_due,
            callback: Some(Box::new(callback)),
        });
        trace!(id, period, "interval registered");

        IntervalHandle {
            id,
            queue: Rc::downgrade(&self.state),
        }
    }

    /// Move the clock forward and fire every due tick.
    ///
    /// Returns the number of ticks fired. A clock value in the past is ignored.
    pub fn advance_to(&self, now: u64) -> usize {
        let mut fired = 0;

        loop {
            // Take the callback out so no borrow is held while it runs.
            let (id, mut callback) = {
                let mut state = self.state.borrow_mut();
                let Some(index) = state.next_due(now) else { break };
                let entry = &mut state.entries[index];
                let id = entry.id;
                let due = entry.next_due;
                let Some(callback) = entry.callback.take() else { break };
                state.now = state.now.max(due);
                (id, callback)
            };

            let flow = callback();
            fired += 1;

            let finished = {
                let mut state = self.state.borrow_mut();
                match state.position(id) {
                    // Cancelled from inside its own tick.
                    None => None,
                    Some(index) if flow.is_break() => Some(state.entries.remove(index)),
                    Some(index) => {
                        let entry = &mut state.entries[index];
                        entry.next_due += entry.period;
                        entry.callback = Some(callback);
                        continue;
                    }
                }
            };
            if finished.is_some() {
                trace!(id, "interval finished");
            }
            // `callback` and any removed entry drop here, outside the borrow.
        }

        let mut state = self.state.borrow_mut();
        state.now = state.now.max(now);
        fired
    }

    /// Deadline of the next pending tick, if any interval is active.
    pub fn next_deadline(&self) -> Option<u64> {
        self.state
            .borrow()
            .entries
            .iter()
            .map(|e| e.next_due)
            .min()
    }

    /// Number of registered, uncancelled intervals.
    pub fn active_count(&self) -> usize {
        self.state.borrow().entries.len()
    }
}

// =============================================================================
// INTERVAL HANDLE
// =============================================================================

/// Owning handle for a registered interval.
///
/// Cancels on drop. Cancelling twice (or after the queue is gone) is a no-op.
pub struct IntervalHandle {
    id: u64,
    queue: Weak<RefCell<QueueState>>,
}

impl IntervalHandle {
    /// Stop the interval. No further ticks are delivered.
    pub fn cancel(&self) {
        let Some(queue) = self.queue.upgrade() else {
            return;
        };
        let removed = {
            let mut state = queue.borrow_mut();
            state.position(self.id).map(|i| state.entries.remove(i))
        };
        if removed.is_some() {
            trace!(id = self.id, "interval cancelled");
        }
    }

    /// Whether the interval is still registered.
    pub fn is_active(&self) -> bool {
        self.queue
            .upgrade()
            .is_some_and(|queue| queue.borrow().position(self.id).is_some())
    }
}

impl Drop for IntervalHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

// =============================================================================
// TESTS
// =============================================================================
