// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use doc_approval_audit::AuditEvent;
use doc_approval_domain::{
    AccessType, ApprovalStatus, Department, DepartmentRecord, Document, DocumentId, User,
};
use serde::Serialize;
use std::collections::BTreeSet;
use time::OffsetDateTime;

/// A side effect requested by a committed transition.
///
/// Effects are data only. The engine turns them into notification events
/// after the transition has been stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Tell every user that the document was approved.
    BroadcastApproval,
    /// Tell the uploader why the document was rejected.
    RecordFeedback {
        /// The rejection feedback.
        feedback: String,
    },
}

/// The result of applying a command to a document.
///
/// Contains the new document, the audit event describing the change,
/// and the effects to run once the change is committed.
#[derive(Debug, Clone)]
pub struct TransitionResult {
    /// The document after the transition.
    pub document: Document,
    /// The audit event generated by this transition.
    pub audit_event: AuditEvent,
    /// Effects to execute after commit.
    pub effects: Vec<Effect>,
}

/// A single item that a multi-document operation could not process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkFailure {
    /// The document that failed.
    pub document_id: DocumentId,
    /// Why it failed.
    pub error: CoreError,
}

/// The outcome of a bulk approve or reject.
///
/// A bulk call succeeds as a whole even when individual documents fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkResult {
    /// Documents that transitioned, in processing order.
    pub succeeded: Vec<DocumentId>,
    /// Documents that did not transition, with the reason.
    pub failed: Vec<BulkFailure>,
}

impl BulkResult {
    /// Returns true when every requested document transitioned.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// The outcome of an approval request or reminder fan-out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Documents for which a notification was dispatched.
    pub dispatched: Vec<DocumentId>,
    /// Documents that were skipped, with the reason.
    pub failed: Vec<BulkFailure>,
}

/// How far back an upload still counts as recent.
pub const RECENT_UPLOAD_DAYS: i64 = 7;

/// Document counts as seen by one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentStatistics {
    /// All visible documents.
    pub total: usize,
    /// Visible documents awaiting a decision.
    pub pending: usize,
    /// Visible approved documents.
    pub approved: usize,
    /// Visible rejected documents.
    pub rejected: usize,
    /// Visible documents with public access.
    pub public: usize,
    /// Distinct departments among the visible documents.
    pub departments: usize,
    /// Visible documents uploaded within the last `RECENT_UPLOAD_DAYS` days.
    pub recent_uploads: usize,
    /// Visible documents belonging to the user's own department.
    pub my_department: usize,
}

impl DocumentStatistics {
    /// Counts `documents` from `user`'s point of view.
    ///
    /// The caller filters for visibility first. An upload is recent when
    /// fewer than `RECENT_UPLOAD_DAYS + 1` whole days have passed.
    #[must_use]
    pub fn collect(user: &User, documents: &[Document], now: OffsetDateTime) -> Self {
        let mut departments: BTreeSet<&Department> = BTreeSet::new();
        let mut stats: Self = Self::default();
        for document in documents {
            stats.total += 1;
            match document.approval_status {
                ApprovalStatus::Pending => stats.pending += 1,
                ApprovalStatus::Approved => stats.approved += 1,
                ApprovalStatus::Rejected => stats.rejected += 1,
            }
            if document.access_type == AccessType::Public {
                stats.public += 1;
            }
            if (now - document.uploaded_at).whole_days() <= RECENT_UPLOAD_DAYS {
                stats.recent_uploads += 1;
            }
            if document.department == user.department {
                stats.my_department += 1;
            }
            departments.insert(&document.department);
        }
        stats.departments = departments.len();
        stats
    }
}

/// A department with the number of its documents visible to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentSummary {
    pub department: DepartmentRecord,
    pub document_count: usize,
}
