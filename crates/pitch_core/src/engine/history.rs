//! Bounded undo history over roster snapshots.

use crate::models::Player;

/// Maximum number of snapshots kept; older entries are dropped.
pub const MAX_UNDO_DEPTH: usize = 10;

/// How long the UI "undo available" affordance stays up after a push. The
/// stack itself is not cleared when this expires.
pub const UNDO_AFFORDANCE_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq)]
pub struct UndoSnapshot {
    pub roster: Vec<Player>,
    pub description: String,
}

#[derive(Debug, Default)]
pub struct UndoStack {
    entries: Vec<UndoSnapshot>,
    last_push_ms: Option<u64>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the pre-mutation roster. Called by every mutating operation
    /// before it touches the roster.
    pub fn push(&mut self, roster: &[Player], description: impl Into<String>, now_ms: u64) {
        if self.entries.len() == MAX_UNDO_DEPTH {
            self.entries.remove(0);
        }
        self.entries.push(UndoSnapshot {
            roster: roster.to_vec(),
            description: description.into(),
        });
        self.last_push_ms = Some(now_ms);
    }

    /// Pop the most recent snapshot, or `None` on an empty stack.
    pub fn pop(&mut self) -> Option<UndoSnapshot> {
        self.entries.pop()
    }

    /// Whether the UI affordance should still be shown.
    pub fn undo_available(&self, now_ms: u64) -> bool {
        match self.last_push_ms {
            Some(pushed) if !self.entries.is_empty() => {
                now_ms.saturating_sub(pushed) < UNDO_AFFORDANCE_MS
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.last_push_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(tag: &str) -> Vec<Player> {
        vec![Player::new(tag, tag, 1)]
    }

    #[test]
    fn pop_restores_in_lifo_order() {
        let mut stack = UndoStack::new();
        stack.push(&roster("s1"), "first", 0);
        stack.push(&roster("s2"), "second", 0);

        let top = stack.pop().unwrap();
        assert_eq!(top.description, "second");
        assert_eq!(top.roster[0].id, "s2");

        let next = stack.pop().unwrap();
        assert_eq!(next.roster[0].id, "s1");

        assert!(stack.pop().is_none());
    }

    #[test]
    fn depth_is_bounded_dropping_oldest() {
        let mut stack = UndoStack::new();
        for i in 0..MAX_UNDO_DEPTH + 3 {
            stack.push(&roster(&format!("s{}", i)), format!("push {}", i), 0);
        }
        assert_eq!(stack.len(), MAX_UNDO_DEPTH);

        // Oldest three were dropped; deepest surviving entry is s3.
        while stack.len() > 1 {
            stack.pop();
        }
        assert_eq!(stack.pop().unwrap().roster[0].id, "s3");
    }

    #[test]
    fn affordance_expires_after_thirty_seconds() {
        let mut stack = UndoStack::new();
        stack.push(&roster("s1"), "push", 1_000);

        assert!(stack.undo_available(1_000));
        assert!(stack.undo_available(1_000 + UNDO_AFFORDANCE_MS - 1));
        assert!(!stack.undo_available(1_000 + UNDO_AFFORDANCE_MS));

        // Expiry does not clear the stack.
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn affordance_requires_entries() {
        let mut stack = UndoStack::new();
        stack.push(&roster("s1"), "push", 0);
        stack.pop();
        assert!(!stack.undo_available(0));
    }
}
