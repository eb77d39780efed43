// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use doc_approval_domain::ApprovalStatus;
use serde::{Deserialize, Serialize};

/// A command represents a requested approval decision as data only.
///
/// Commands are the only way to change a document's approval status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Approve a pending document.
    Approve,
    /// Reject a pending document.
    Reject {
        /// Why the document was rejected. Must not be empty.
        feedback: String,
    },
}

impl Command {
    /// The action name used in errors and logs.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject { .. } => "reject",
        }
    }

    /// The status a successful command moves the document to.
    #[must_use]
    pub const fn target_status(&self) -> ApprovalStatus {
        match self {
            Self::Approve => ApprovalStatus::Approved,
            Self::Reject { .. } => ApprovalStatus::Rejected,
        }
    }
}

/// The decision applied by a bulk operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkAction {
    /// Approve every document.
    Approve,
    /// Reject every document with shared feedback.
    Reject,
}

impl BulkAction {
    /// Converts this action to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

/// A read access that is recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessKind {
    /// The document was opened.
    View,
    /// The file was downloaded.
    Download,
}

impl AccessKind {
    /// The audit action name for this access.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::View => "View",
            Self::Download => "Download",
        }
    }
}
