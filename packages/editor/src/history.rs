//! # Undo/Redo History
//!
//! Linear snapshot history of the page being edited.
//!
//! ## Design
//!
//! - Each structural mutation pushes a full page snapshot
//! - The cursor points at the snapshot matching the current page
//! - Undo/redo move the cursor; they never push
//! - Pushing after an undo truncates the redo tail
//! - At capacity the oldest snapshot is dropped
//!
//! Snapshots are shared (`Arc`) so cloning editor state does not copy pages.

use hearth_document::PageDocument;
use std::sync::Arc;

/// Default maximum number of retained snapshots
pub const MAX_HISTORY: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct History {
    entries: Vec<Arc<PageDocument>>,
    index: usize,
    max_levels: usize,
}

impl History {
    /// Empty history (no page open)
    pub fn new() -> Self {
        Self::with_max_levels(MAX_HISTORY)
    }

    /// Empty history with custom capacity (minimum 1)
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
            max_levels: max_levels.max(1),
        }
    }

    /// Discard everything and start from `page` at index 0
    pub fn reset(&mut self, page: PageDocument) {
        self.entries.clear();
        self.entries.push(Arc::new(page));
        self.index = 0;
    }

    /// Record a new snapshot after the cursor
    pub fn push(&mut self, page: PageDocument) {
        if !self.entries.is_empty() {
            // New action invalidates future
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(Arc::new(page));

        if self.entries.len() > self.max_levels {
            let excess = self.entries.len() - self.max_levels;
            self.entries.drain(..excess);
            tracing::trace!(dropped = excess, "History capacity reached, oldest snapshot dropped");
        }

        self.index = self.entries.len() - 1;
    }

    /// Step back; returns the snapshot to restore
    pub fn undo(&mut self) -> Option<&PageDocument> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index).map(Arc::as_ref)
    }

    /// Step forward; returns the snapshot to restore
    pub fn redo(&mut self) -> Option<&PageDocument> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index).map(Arc::as_ref)
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.index + 1 < self.entries.len()
    }

    pub fn current(&self) -> Option<&PageDocument> {
        self.entries.get(self.index).map(Arc::as_ref)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Number of undo steps available
    pub fn undo_levels(&self) -> usize {
        if self.entries.is_empty() {
            0
        } else {
            self.index
        }
    }

    /// Number of redo steps available
    pub fn redo_levels(&self) -> usize {
        if self.entries.is_empty() {
            0
        } else {
            self.entries.len() - 1 - self.index
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
