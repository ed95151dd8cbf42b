//! Linear undo/redo history of full document snapshots
//!
//! The tree is replaced wholesale on every mutation, so history is a plain
//! past/present/future triple of owned snapshots. Snapshots are independent
//! clones; mutating the present can never retroactively alter a historical
//! entry.

/// Manages the past/present/future snapshot stacks.
#[derive(Debug, Clone)]
pub struct History<T: Clone + PartialEq> {
    past: Vec<T>,
    present: T,
    future: Vec<T>,
}

impl<T: Clone + PartialEq> History<T> {
    /// Create a history with the given baseline state.
    pub fn new(present: T) -> Self {
        Self {
            past: Vec::new(),
            present,
            future: Vec::new(),
        }
    }

    /// The current snapshot.
    pub fn present(&self) -> &T {
        &self.present
    }

    /// Record a new snapshot. A no-op if it equals the present snapshot;
    /// otherwise the present moves to the past and the redo stack is
    /// discarded.
    pub fn push(&mut self, snapshot: T) {
        if snapshot == self.present {
            return;
        }
        let previous = std::mem::replace(&mut self.present, snapshot);
        self.past.push(previous);
        self.future.clear();
    }

    /// Step back one snapshot. Returns the new present, or `None` when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> Option<&T> {
        let previous = self.past.pop()?;
        let displaced = std::mem::replace(&mut self.present, previous);
        self.future.insert(0, displaced);
        Some(&self.present)
    }

    /// Step forward one snapshot. Returns the new present, or `None` when
    /// there is nothing to redo.
    pub fn redo(&mut self) -> Option<&T> {
        if self.future.is_empty() {
            return None;
        }
        let next = self.future.remove(0);
        let displaced = std::mem::replace(&mut self.present, next);
        self.past.push(displaced);
        Some(&self.present)
    }

    /// Discard both stacks, keeping the present snapshot. Used after an
    /// import so the installed state becomes an unreachable-by-undo
    /// baseline.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    /// Replace the present snapshot and discard both stacks.
    pub fn reset(&mut self, present: T) {
        self.past.clear();
        self.future.clear();
        self.present = present;
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_undo() {
        let mut history = History::new(0);
        history.push(1);
        history.push(2);

        assert!(history.can_undo());
        assert_eq!(history.undo(), Some(&1));
        assert_eq!(history.undo(), Some(&0));
        assert_eq!(history.undo(), None);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_redo_restores_in_order() {
        let mut history = History::new(0);
        history.push(1);
        history.push(2);
        history.undo();
        history.undo();

        assert_eq!(history.redo(), Some(&1));
        assert_eq!(history.redo(), Some(&2));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_new_push_discards_future() {
        let mut history = History::new(0);
        history.push(1);
        history.undo();
        assert!(history.can_redo());

        history.push(5);
        assert!(!history.can_redo());
        assert_eq!(history.present(), &5);
        // The discarded branch is gone for good.
        assert_eq!(history.undo(), Some(&0));
    }

    #[test]
    fn test_push_dedups_on_equality() {
        let mut history = History::new(7);
        history.push(7);
        assert!(!history.can_undo());

        history.push(8);
        history.undo();
        history.push(7); // equal to present after undo
        assert!(history.can_redo(), "no-op push must not discard the future");
    }

    #[test]
    fn test_clear_keeps_present() {
        let mut history = History::new(0);
        history.push(1);
        history.push(2);
        history.undo();

        history.clear();
        assert_eq!(history.present(), &1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_reset_replaces_present() {
        let mut history = History::new(0);
        history.push(1);
        history.reset(9);
        assert_eq!(history.present(), &9);
        assert!(!history.can_undo());
    }
}
