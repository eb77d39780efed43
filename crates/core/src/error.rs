// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use doc_approval_domain::{ApprovalStatus, Department, DocumentId, DomainError, Role, UserId};

/// Errors that can occur while operating on documents.
///
/// None of these are transient: callers report them, they are never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Input failed a domain validation rule (for example, empty feedback).
    #[error("Validation failed: {0}")]
    Validation(#[from] DomainError),
    /// The acting user's role or department does not permit the action.
    #[error("Unauthorized: {role} '{user_id}' may not {action} document {document_id}: {reason}")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The acting user.
        user_id: UserId,
        /// The acting user's role.
        role: Role,
        /// The target document.
        document_id: DocumentId,
        /// Why the check failed.
        reason: String,
    },
    /// The acting user's role does not permit an action that targets no
    /// particular document.
    #[error("Unauthorized: {role} '{user_id}' may not {action}: {reason}")]
    NotPermitted {
        /// The action that was attempted.
        action: String,
        /// The acting user.
        user_id: UserId,
        /// The acting user's role.
        role: Role,
        /// Why the check failed.
        reason: String,
    },
    /// The document is not in a state the action applies to.
    #[error("Invalid transition: cannot {action} document {document_id} in state {from}")]
    InvalidTransition {
        /// The target document.
        document_id: DocumentId,
        /// The document's current status.
        from: ApprovalStatus,
        /// The action that was attempted.
        action: String,
    },
    /// No document with this id exists.
    #[error("Document {0} not found")]
    NotFound(DocumentId),
    /// A document with this id already exists.
    #[error("Document {0} already exists")]
    DuplicateDocument(DocumentId),
    /// No user with this id exists.
    #[error("User {0} not found")]
    UnknownUser(UserId),
    /// A user with this id already exists.
    #[error("User {0} already exists")]
    DuplicateUser(UserId),
    /// A department with this name is already registered.
    #[error("Department {0} already exists")]
    DuplicateDepartment(Department),
    /// The user has already accepted this document.
    #[error("User {user_id} has already accepted document {document_id}")]
    DuplicateAcceptance {
        /// The accepted document.
        document_id: DocumentId,
        /// The accepting user.
        user_id: UserId,
    },
    /// The document cannot be accepted.
    #[error("Document {document_id} cannot be accepted: {reason}")]
    AcceptanceNotAllowed {
        /// The target document.
        document_id: DocumentId,
        /// Why acceptance is not possible.
        reason: String,
    },
}
