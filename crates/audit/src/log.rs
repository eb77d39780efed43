// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::AuditEvent;
use doc_approval_domain::DocumentId;
use parking_lot::Mutex;

/// Append-only, in-memory audit log.
///
/// Events are numbered from 1 in the order they are recorded. Recorded
/// events are never modified or removed.
#[derive(Debug, Default)]
pub struct AuditLog {
    events: Mutex<Vec<AuditEvent>>,
}

impl AuditLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event, assigning and returning its event id.
    pub fn record(&self, mut event: AuditEvent) -> u64 {
        let mut events = self.events.lock();
        let event_id: u64 = events.len() as u64 + 1;
        event.event_id = Some(event_id);
        events.push(event);
        event_id
    }

    /// Returns the event with the given id, if recorded.
    #[must_use]
    pub fn get(&self, event_id: u64) -> Option<AuditEvent> {
        let index: usize = usize::try_from(event_id.checked_sub(1)?).ok()?;
        self.events.lock().get(index).cloned()
    }

    /// Returns all events scoped to a document, oldest first.
    #[must_use]
    pub fn for_document(&self, document_id: &DocumentId) -> Vec<AuditEvent> {
        self.events
            .lock()
            .iter()
            .filter(|event| &event.document_id == document_id)
            .cloned()
            .collect()
    }

    /// Returns every recorded event, oldest first.
    #[must_use]
    pub fn all(&self) -> Vec<AuditEvent> {
        self.events.lock().clone()
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Returns whether no events have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}
