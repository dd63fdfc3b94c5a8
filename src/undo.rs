//! Client-side undo/redo for drag-and-drop relocations: a bounded linear
//! history of applied moves. Pure state, never persisted; a client reload
//! starts from an empty stack.

use uuid::Uuid;

use crate::grid::Location;

/// Default cap on remembered moves; the oldest entries fall off first.
pub const DEFAULT_CAPACITY: usize = 100;

/// One applied relocation as the client saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub product_id: Uuid,
    pub product_name: String,
    pub from: Location,
    pub to: Location,
}

impl AppliedMove {
    /// The move that takes the product back where it came from.
    pub fn inverse(&self) -> Self {
        Self {
            product_id: self.product_id,
            product_name: self.product_name.clone(),
            from: self.to,
            to: self.from,
        }
    }
}

/// Linear history with a cursor. `push` after an undo truncates the
/// redoable tail; branching histories are not supported.
#[derive(Debug, Clone)]
pub struct MoveStack {
    entries: Vec<AppliedMove>,
    /// Number of entries currently applied; always <= entries.len().
    applied: usize,
    capacity: usize,
}

impl Default for MoveStack {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl MoveStack {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            applied: 0,
            capacity: capacity.max(1),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    pub fn can_redo(&self) -> bool {
        self.applied < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a freshly applied move, discarding anything beyond the
    /// cursor and the oldest entry once the capacity is reached.
    pub fn push(&mut self, applied: AppliedMove) {
        self.entries.truncate(self.applied);
        if self.entries.len() == self.capacity {
            self.entries.remove(0);
        }
        self.entries.push(applied);
        self.applied = self.entries.len();
    }

    /// Step back one move, yielding the inverse the caller should apply.
    /// A no-op at the start of history.
    pub fn undo(&mut self) -> Option<AppliedMove> {
        if !self.can_undo() {
            return None;
        }
        self.applied -= 1;
        Some(self.entries[self.applied].inverse())
    }

    /// Step forward one move, yielding the move the caller should re-apply.
    /// A no-op at the end of history.
    pub fn redo(&mut self) -> Option<AppliedMove> {
        if !self.can_redo() {
            return None;
        }
        let next = self.entries[self.applied].clone();
        self.applied += 1;
        Some(next)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.applied = 0;
    }
}
