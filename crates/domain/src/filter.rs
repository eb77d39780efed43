// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document search filters and ordering.
//!
//! Filtering is a linear predicate scan over the documents handed in.
//! There is no index and no relevance ranking.

use crate::error::DomainError;
use crate::types::{ApprovalStatus, Department, Document, DocumentType, FileType};
use std::cmp::Ordering;
use std::str::FromStr;

/// Predicate over documents.
///
/// Every populated field must match for a document to pass. An empty
/// filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    /// Case-insensitive substring matched against title, description and tags.
    pub query: Option<String>,
    /// Exact department match.
    pub department: Option<Department>,
    /// Exact document type match.
    pub document_type: Option<DocumentType>,
    /// Exact file type match.
    pub file_type: Option<FileType>,
    /// Exact approval status match.
    pub status: Option<ApprovalStatus>,
}

impl DocumentFilter {
    /// Creates a filter that matches every document.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Creates a filter that matches only pending documents.
    #[must_use]
    pub fn pending() -> Self {
        Self {
            status: Some(ApprovalStatus::Pending),
            ..Self::default()
        }
    }

    /// Returns whether the document satisfies every populated field.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        self.matches_query(document)
            && self
                .department
                .as_ref()
                .is_none_or(|d| d == &document.department)
            && self
                .document_type
                .is_none_or(|t| t == document.document_type)
            && self.file_type.is_none_or(|t| t == document.file_type)
            && self.status.is_none_or(|s| s == document.approval_status)
    }

    fn matches_query(&self, document: &Document) -> bool {
        let Some(query) = self.query.as_deref() else {
            return true;
        };
        let needle: String = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        document.title.to_lowercase().contains(&needle)
            || document.description.to_lowercase().contains(&needle)
            || document
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
    }
}

/// The field documents are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Department name, lexicographic.
    Department,
    /// File type name, lexicographic.
    FileType,
    /// Upload timestamp.
    Date,
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "department" => Ok(Self::Department),
            "filetype" | "file_type" => Ok(Self::FileType),
            "date" => Ok(Self::Date),
            _ => Err(DomainError::InvalidSortKey(s.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(DomainError::InvalidSortOrder(s.to_string())),
        }
    }
}

/// Orders documents in place.
///
/// Without a key, documents are ordered newest upload first with the
/// identifier as a tie-breaker, so listings are stable across calls.
pub fn sort_documents(documents: &mut [Document], key: Option<SortKey>, order: SortOrder) {
    let Some(key) = key else {
        documents.sort_by(|a, b| {
            b.uploaded_at
                .cmp(&a.uploaded_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        return;
    };

    documents.sort_by(|a, b| {
        let ordering: Ordering = match key {
            SortKey::Department => a.department.cmp(&b.department),
            SortKey::FileType => a.file_type.as_str().cmp(b.file_type.as_str()),
            SortKey::Date => a.uploaded_at.cmp(&b.uploaded_at),
        };
        let ordering: Ordering = ordering.then_with(|| a.id.cmp(&b.id));
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}
