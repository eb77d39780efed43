// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use doc_approval_domain::{DocumentAcceptance, DocumentId, UserId};
use parking_lot::Mutex;

/// Append-only record of document acceptances.
///
/// A user may accept a given document at most once.
#[derive(Debug, Default)]
pub struct AcceptanceLedger {
    entries: Mutex<Vec<DocumentAcceptance>>,
}

impl AcceptanceLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an acceptance.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DuplicateAcceptance` if this user already accepted
    /// this document.
    pub fn record(&self, acceptance: DocumentAcceptance) -> Result<(), CoreError> {
        let mut entries = self.entries.lock();
        if entries
            .iter()
            .any(|e| e.document_id == acceptance.document_id && e.user_id == acceptance.user_id)
        {
            return Err(CoreError::DuplicateAcceptance {
                document_id: acceptance.document_id,
                user_id: acceptance.user_id,
            });
        }
        entries.push(acceptance);
        drop(entries);
        Ok(())
    }

    #[must_use]
    pub fn has_accepted(&self, document_id: &DocumentId, user_id: &UserId) -> bool {
        self.entries
            .lock()
            .iter()
            .any(|e| &e.document_id == document_id && &e.user_id == user_id)
    }

    /// Returns every acceptance of a document, oldest first.
    #[must_use]
    pub fn for_document(&self, document_id: &DocumentId) -> Vec<DocumentAcceptance> {
        self.entries
            .lock()
            .iter()
            .filter(|e| &e.document_id == document_id)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
