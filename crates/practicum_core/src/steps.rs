//! Step gating for prompt sequences.
//!
//! A sequence item's sub-prompts unlock one at a time: step *i* stays locked
//! until every earlier step is marked complete. Completion is ephemeral
//! client state scoped to the item currently in view: switching items
//! discards all progress. Nothing here is persisted.

use std::collections::BTreeSet;

/// Display state of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    /// Marked done.
    Completed,
    /// Next up: not done, nothing before it outstanding.
    Active,
    /// An earlier step is still incomplete.
    Locked,
}

/// Completion tracker for the sequence currently in view.
#[derive(Debug, Default)]
pub struct StepTracker {
    item_id: Option<String>,
    completed: BTreeSet<usize>,
}

impl StepTracker {
    /// Empty tracker, no item in view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the tracker at an item. Progress resets whenever the viewed
    /// item changes; refocusing the same item keeps it.
    pub fn focus(&mut self, item_id: &str) {
        if self.item_id.as_deref() != Some(item_id) {
            self.item_id = Some(item_id.to_string());
            self.completed.clear();
        }
    }

    /// Clear all progress and the focused item.
    pub fn reset(&mut self) {
        self.item_id = None;
        self.completed.clear();
    }

    /// State of `step` (0-based).
    pub fn state(&self, step: usize) -> StepState {
        if self.completed.contains(&step) {
            return StepState::Completed;
        }
        if (0..step).all(|earlier| self.completed.contains(&earlier)) {
            StepState::Active
        } else {
            StepState::Locked
        }
    }

    /// Mark `step` complete. Only the active step can be completed; locked
    /// and already-completed steps are rejected.
    pub fn complete(&mut self, step: usize) -> bool {
        if self.state(step) != StepState::Active {
            return false;
        }
        self.completed.insert(step);
        true
    }

    /// Number of completed steps.
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_step_active_rest_locked() {
        let mut tracker = StepTracker::new();
        tracker.focus("seq-1");

        assert_eq!(tracker.state(0), StepState::Active);
        assert_eq!(tracker.state(1), StepState::Locked);
        assert_eq!(tracker.state(2), StepState::Locked);
    }

    #[test]
    fn test_completing_unlocks_only_the_next_step() {
        let mut tracker = StepTracker::new();
        tracker.focus("seq-1");

        assert!(tracker.complete(0));
        assert_eq!(tracker.state(0), StepState::Completed);
        assert_eq!(tracker.state(1), StepState::Active);
        // No skip-unlock of step 2.
        assert_eq!(tracker.state(2), StepState::Locked);
    }

    #[test]
    fn test_locked_step_cannot_be_completed() {
        let mut tracker = StepTracker::new();
        tracker.focus("seq-1");

        assert!(!tracker.complete(2));
        assert_eq!(tracker.state(2), StepState::Locked);
        assert_eq!(tracker.completed_count(), 0);
    }

    #[test]
    fn test_switching_items_resets_progress() {
        let mut tracker = StepTracker::new();
        tracker.focus("seq-1");
        tracker.complete(0);
        tracker.complete(1);

        tracker.focus("seq-2");
        assert_eq!(tracker.completed_count(), 0);
        assert_eq!(tracker.state(0), StepState::Active);
    }

    #[test]
    fn test_refocusing_same_item_keeps_progress() {
        let mut tracker = StepTracker::new();
        tracker.focus("seq-1");
        tracker.complete(0);

        tracker.focus("seq-1");
        assert_eq!(tracker.completed_count(), 1);
    }
}
