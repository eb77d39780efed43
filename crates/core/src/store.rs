// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use doc_approval_domain::{AccessType, Document, DocumentId, DomainError};
use time::{Date, OffsetDateTime};

/// A partial update of a document's descriptive fields.
///
/// Approval fields are deliberately absent: they change only through
/// `DocumentStore::transition`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub url: Option<String>,
    pub access_type: Option<AccessType>,
    /// `Some(None)` clears the expiry date.
    pub expiry_date: Option<Option<Date>>,
}

impl DocumentPatch {
    /// Returns true if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.tags.is_none()
            && self.url.is_none()
            && self.access_type.is_none()
            && self.expiry_date.is_none()
    }

    fn apply_to(self, document: &mut Document) {
        if let Some(title) = self.title {
            document.title = title;
        }
        if let Some(description) = self.description {
            document.description = description;
        }
        if let Some(tags) = self.tags {
            document.tags = tags;
        }
        if let Some(url) = self.url {
            document.url = url;
        }
        if let Some(access_type) = self.access_type {
            document.access_type = access_type;
        }
        if let Some(expiry_date) = self.expiry_date {
            document.expiry_date = expiry_date;
        }
    }
}

/// A document as it was before and after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentChange {
    pub before: Document,
    pub after: Document,
}

/// The authoritative set of documents.
///
/// Backed by a sharded concurrent map. Each document has a single logical
/// writer: `update` and `transition` hold the entry's write lock for the
/// whole read-check-write sequence.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<DocumentId, Document>,
}

impl DocumentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new document.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DuplicateDocument` if the id is already present.
    pub fn insert(&self, document: Document) -> Result<(), CoreError> {
        match self.documents.entry(document.id.clone()) {
            Entry::Occupied(entry) => Err(CoreError::DuplicateDocument(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(document);
                Ok(())
            }
        }
    }

    /// Returns a copy of the document.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the id is absent.
    pub fn get(&self, id: &DocumentId) -> Result<Document, CoreError> {
        self.documents
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| CoreError::NotFound(id.clone()))
    }

    #[must_use]
    pub fn contains(&self, id: &DocumentId) -> bool {
        self.documents.contains_key(id)
    }

    /// Returns copies of every document matching `predicate`, in no
    /// particular order.
    #[must_use]
    pub fn list<P>(&self, predicate: P) -> Vec<Document>
    where
        P: Fn(&Document) -> bool,
    {
        self.documents
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Applies a partial update to a document's descriptive fields and bumps
    /// its modification time.
    ///
    /// The expiry date is checked against the stored upload date and both
    /// snapshots are taken under the entry's write lock.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the id is absent, or
    /// `CoreError::Validation` if the patch would blank the title or set an
    /// expiry date before the upload date.
    pub fn update(
        &self,
        id: &DocumentId,
        patch: DocumentPatch,
        now: OffsetDateTime,
    ) -> Result<DocumentChange, CoreError> {
        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(CoreError::Validation(DomainError::InvalidTitle(String::from(
                "Title cannot be empty",
            ))));
        }
        let mut entry = self
            .documents
            .get_mut(id)
            .ok_or_else(|| CoreError::NotFound(id.clone()))?;
        let uploaded_on: Date = entry.uploaded_at.date();
        if let Some(Some(expiry_date)) = patch.expiry_date
            && expiry_date < uploaded_on
        {
            return Err(CoreError::Validation(DomainError::ExpiryBeforeUpload {
                expiry_date,
                uploaded_on,
            }));
        }
        let before: Document = entry.value().clone();
        patch.apply_to(entry.value_mut());
        entry.last_modified = now;
        Ok(DocumentChange {
            before,
            after: entry.value().clone(),
        })
    }

    /// Runs a validate-then-mutate step on one document while holding its
    /// write lock.
    ///
    /// `f` receives the current document and returns the replacement plus a
    /// value passed back to the caller. Nothing is written if `f` fails.
    /// `f` must not call back into the store.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the id is absent, or whatever `f`
    /// returns.
    pub fn transition<T, F>(&self, id: &DocumentId, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(&Document) -> Result<(Document, T), CoreError>,
    {
        let mut entry = self
            .documents
            .get_mut(id)
            .ok_or_else(|| CoreError::NotFound(id.clone()))?;
        let (next, output): (Document, T) = f(entry.value())?;
        *entry.value_mut() = next;
        Ok(output)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
