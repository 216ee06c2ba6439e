//! Cancellable delayed-value abstraction.
//!
//! Search keystrokes don't hit the derived-view layer directly: each
//! keystroke replaces the pending value and restarts the delay window, and
//! only the value that survives a quiet window is applied
//! (last-write-wins). Built on `tokio::time` so tests drive it with a
//! paused clock instead of real sleeps.

use std::time::Duration;

use tokio::time::Instant;

/// Delay applied to search input before the query state updates.
pub const SEARCH_DELAY: Duration = Duration::from_millis(150);

/// Holds at most one pending value and the deadline it settles at.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<T>,
    deadline: Option<Instant>,
}

impl<T> Debouncer<T> {
    /// Debouncer with a custom quiet window.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            deadline: None,
        }
    }

    /// Debouncer tuned for search input (~150 ms).
    pub fn for_search() -> Self {
        Self::new(SEARCH_DELAY)
    }

    /// Replace the pending value and restart the quiet window.
    pub fn push(&mut self, value: T) {
        self.pending = Some(value);
        self.deadline = Some(Instant::now() + self.delay);
    }

    /// True while a value is waiting for its window to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending value without applying it.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.deadline = None;
    }

    /// Wait out the current quiet window and yield the surviving value.
    ///
    /// Returns `None` immediately when nothing is pending. Intended for use
    /// inside a `select!` loop, where a concurrent [`push`](Self::push)
    /// restarts the wait on the next iteration.
    pub async fn settled(&mut self) -> Option<T> {
        let deadline = self.deadline?;
        tokio::time::sleep_until(deadline).await;
        self.deadline = None;
        self.pending.take()
    }
}
