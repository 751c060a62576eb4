//! Undo/redo history of paint operations.
//!
//! DESIGN
//! ======
//! `PaintHistory` owns the active paint items and two operation stacks.
//! Committing or removing items records an operation and clears the redo
//! stack. Undo/redo replay operations in reverse/forward order. When the
//! undo stack exceeds its limit the oldest operation is evicted and becomes
//! permanent.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use tracing::debug;

use crate::model::{LayerId, PaintItem};

/// One undoable change to the active item list.
#[derive(Debug, Clone, PartialEq)]
enum HistoryOp {
    /// An item appended at the end of the list.
    Add(PaintItem),
    /// Items removed, with their positions before removal in ascending order.
    Remove(Vec<(usize, PaintItem)>),
}

/// Ordered paint items plus undo/redo stacks.
#[derive(Debug, Clone, Default)]
pub struct PaintHistory {
    items: Vec<PaintItem>,
    undo: VecDeque<HistoryOp>,
    redo: Vec<HistoryOp>,
    limit: usize,
}

impl PaintHistory {
    /// Create an empty history keeping at most `limit` undo steps (`0` = unbounded).
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self { limit, ..Self::default() }
    }

    /// Active items in paint order (bottom first).
    #[must_use]
    pub fn items(&self) -> &[PaintItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &LayerId) -> Option<&PaintItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Append a committed item.
    pub fn push(&mut self, item: PaintItem) {
        self.items.push(item.clone());
        self.record(HistoryOp::Add(item));
    }

    /// Remove the items with the given ids. Unknown ids are skipped.
    ///
    /// Returns the ids actually removed, in list order.
    pub fn remove(&mut self, ids: &[LayerId]) -> Vec<LayerId> {
        let removed = take_items(&mut self.items, ids);
        if removed.is_empty() {
            return Vec::new();
        }
        let out = removed.iter().map(|(_, item)| item.id).collect();
        self.record(HistoryOp::Remove(removed));
        out
    }

    /// Revert the most recent operation. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(op) = self.undo.pop_back() else {
            return false;
        };
        match &op {
            HistoryOp::Add(item) => {
                self.items.retain(|i| i.id != item.id);
            }
            HistoryOp::Remove(removed) => {
                for (index, item) in removed {
                    let at = (*index).min(self.items.len());
                    self.items.insert(at, item.clone());
                }
            }
        }
        debug!(items = self.items.len(), "paint history undo");
        self.redo.push(op);
        true
    }

    /// Re-apply the most recently undone operation. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(op) = self.redo.pop() else {
            return false;
        };
        match &op {
            HistoryOp::Add(item) => self.items.push(item.clone()),
            HistoryOp::Remove(removed) => {
                let ids: Vec<LayerId> = removed.iter().map(|(_, item)| item.id).collect();
                take_items(&mut self.items, &ids);
            }
        }
        debug!(items = self.items.len(), "paint history redo");
        self.undo.push_back(op);
        true
    }

    /// Drop all items and operations.
    pub fn clear(&mut self) {
        self.items.clear();
        self.undo.clear();
        self.redo.clear();
    }

    fn record(&mut self, op: HistoryOp) {
        self.redo.clear();
        self.undo.push_back(op);
        if self.limit > 0 && self.undo.len() > self.limit {
            self.undo.pop_front();
            debug!(limit = self.limit, "evicted oldest paint history entry");
        }
    }
}

/// Remove matching items, returning them with their original indices, ascending.
fn take_items(items: &mut Vec<PaintItem>, ids: &[LayerId]) -> Vec<(usize, PaintItem)> {
    let mut removed = Vec::new();
    let mut kept = Vec::with_capacity(items.len());
    for (index, item) in items.drain(..).enumerate() {
        if ids.contains(&item.id) {
            removed.push((index, item));
        } else {
            kept.push(item);
        }
    }
    *items = kept;
    removed
}
