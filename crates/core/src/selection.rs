// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use doc_approval_domain::DocumentId;
use std::collections::HashSet;

/// The set of document ids a user has selected for a bulk operation.
///
/// Every operation is idempotent. Snapshots are sorted so that callers get
/// a stable order, but no ordering is implied by the set itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    selected: HashSet<DocumentId>,
}

impl SelectionTracker {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an id. Adding an id twice has no further effect.
    pub fn add(&mut self, id: DocumentId) {
        self.selected.insert(id);
    }

    /// Removes an id if present.
    pub fn remove(&mut self, id: &DocumentId) {
        self.selected.remove(id);
    }

    /// Sets whether an id is selected.
    pub fn toggle(&mut self, id: DocumentId, selected: bool) {
        if selected {
            self.add(id);
        } else {
            self.remove(&id);
        }
    }

    /// Removes every id in `ids`.
    pub fn remove_all<'a, I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = &'a DocumentId>,
    {
        for id in ids {
            self.selected.remove(id);
        }
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    #[must_use]
    pub fn contains(&self, id: &DocumentId) -> bool {
        self.selected.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Returns the selected ids in sorted order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<DocumentId> {
        let mut ids: Vec<DocumentId> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }
}
