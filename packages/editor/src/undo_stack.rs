//! # Undo/Redo Stack
//!
//! Linear history of whole-tree snapshots.
//!
//! ## Design
//!
//! - The stack starts with a single snapshot (the empty page) at index 0
//! - Recording truncates everything after the cursor, appends, and moves the
//!   cursor to the new last entry
//! - Undo/redo only move the cursor; they stop at either end
//! - Snapshots are owned trees, so nothing outside the stack can change a
//!   recorded state
//! - Selection and clipboard live outside the stack and are never versioned
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//! stack.record(tree_with_heading, Some("Insert heading"));
//!
//! stack.undo();   // back to the empty page
//! stack.redo();   // heading again
//! ```

use crate::tree::ElementTree;

/// One recorded state of the page
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tree: ElementTree,

    /// Description of the action that produced this state
    pub label: Option<String>,
}

/// Undo/redo history for one document
#[derive(Debug, Clone)]
pub struct UndoStack {
    snapshots: Vec<Snapshot>,

    /// Index of the snapshot currently shown
    cursor: usize,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl UndoStack {
    /// Create an unlimited stack holding the empty page
    pub fn new() -> Self {
        Self::with_max_levels(0)
    }

    /// Create a stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self::with_initial(ElementTree::new(), max_levels)
    }

    /// Create a stack whose first snapshot is `tree`
    pub fn with_initial(tree: ElementTree, max_levels: usize) -> Self {
        Self {
            snapshots: vec![Snapshot { tree, label: None }],
            cursor: 0,
            max_levels,
        }
    }

    /// Record a new state after the cursor, discarding any redo entries
    pub fn record(&mut self, tree: ElementTree, label: Option<&str>) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(Snapshot {
            tree,
            label: label.map(str::to_string),
        });
        self.cursor = self.snapshots.len() - 1;

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.cursor > self.max_levels {
            let excess = self.cursor - self.max_levels;
            self.snapshots.drain(..excess);
            self.cursor -= excess;
        }
    }

    /// Step back one snapshot. `None` when already at the oldest one.
    pub fn undo(&mut self) -> Option<&ElementTree> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Step forward one snapshot. `None` when already at the newest one.
    pub fn redo(&mut self) -> Option<&ElementTree> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Tree at the cursor
    pub fn current(&self) -> &ElementTree {
        &self.snapshots[self.cursor].tree
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of snapshots held, including the initial one
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.cursor
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.snapshots.len() - 1 - self.cursor
    }

    /// Description of the action the next undo reverts
    pub fn undo_label(&self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.snapshots[self.cursor].label.as_deref()
    }

    /// Description of the action the next redo reapplies
    pub fn redo_label(&self) -> Option<&str> {
        self.snapshots
            .get(self.cursor + 1)
            .and_then(|snapshot| snapshot.label.as_deref())
    }

    /// Drop all history, keeping the current tree as the only snapshot
    pub fn clear(&mut self) {
        let current = self.snapshots.swap_remove(self.cursor);
        self.snapshots = vec![Snapshot {
            tree: current.tree,
            label: None,
        }];
        self.cursor = 0;
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
