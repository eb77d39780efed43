// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use doc_approval::CoreError;
use doc_approval_domain::DomainError;

/// Authentication and authorization errors raised before the core is reached.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the user does not have permission.
    #[error("Unauthorized: cannot {action}: {reason}")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Why the action was refused.
        reason: String,
    },
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                reason: format!("requires {required_role} role"),
            },
        }
    }
}

fn invalid(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidFeedback(msg) => invalid("feedback", msg),
        DomainError::InvalidTitle(msg) => invalid("title", msg),
        DomainError::InvalidDepartment(msg) => invalid("department", msg),
        DomainError::InvalidColor(value) => {
            invalid("color", format!("'{value}' is not a #RRGGBB color"))
        }
        DomainError::InvalidDocumentId(msg) => invalid("id", msg),
        DomainError::InvalidUserId(msg) => invalid("user_id", msg),
        DomainError::InvalidName(msg) => invalid("name", msg),
        DomainError::InvalidEmail(msg) => invalid("email", msg),
        DomainError::InvalidRole(value) => invalid("role", format!("Unknown role '{value}'")),
        DomainError::InvalidApprovalStatus(value) => {
            invalid("status", format!("Unknown approval status '{value}'"))
        }
        DomainError::InvalidAccessType(value) => {
            invalid("access_type", format!("Unknown access type '{value}'"))
        }
        DomainError::InvalidDocumentType(value) => {
            invalid("document_type", format!("Unknown document type '{value}'"))
        }
        DomainError::InvalidFileType(value) => {
            invalid("file_type", format!("Unknown file type '{value}'"))
        }
        DomainError::InvalidAcceptanceType(value) => invalid(
            "acceptance_type",
            format!("Unknown acceptance type '{value}'"),
        ),
        DomainError::InvalidSortKey(value) => invalid("sort", format!("Unknown sort key '{value}'")),
        DomainError::InvalidSortOrder(value) => {
            invalid("order", format!("Unknown sort order '{value}'"))
        }
        DomainError::ExpiryBeforeUpload {
            expiry_date,
            uploaded_on,
        } => invalid(
            "expiry_date",
            format!("Expiry date {expiry_date} is before upload date {uploaded_on}"),
        ),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::Validation(domain_err) => translate_domain_error(domain_err),
        CoreError::Unauthorized {
            action,
            document_id,
            reason,
            ..
        } => ApiError::Unauthorized {
            action: format!("{action} document {document_id}"),
            reason,
        },
        CoreError::NotPermitted { action, reason, .. } => ApiError::Unauthorized { action, reason },
        CoreError::InvalidTransition {
            document_id,
            from,
            action,
        } => ApiError::DomainRuleViolation {
            rule: String::from("terminal_state"),
            message: format!("Cannot {action} document {document_id}: it is already {from}"),
        },
        CoreError::NotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Document"),
            message: format!("Document {id} does not exist"),
        },
        CoreError::DuplicateDocument(id) => ApiError::DomainRuleViolation {
            rule: String::from("unique_document_id"),
            message: format!("Document {id} already exists"),
        },
        CoreError::UnknownUser(id) => ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User {id} does not exist"),
        },
        CoreError::DuplicateUser(id) => ApiError::DomainRuleViolation {
            rule: String::from("unique_user_id"),
            message: format!("User {id} already exists"),
        },
        CoreError::DuplicateDepartment(name) => ApiError::DomainRuleViolation {
            rule: String::from("unique_department"),
            message: format!("Department {name} already exists"),
        },
        CoreError::DuplicateAcceptance {
            document_id,
            user_id,
        } => ApiError::DomainRuleViolation {
            rule: String::from("single_acceptance"),
            message: format!("User {user_id} has already accepted document {document_id}"),
        },
        CoreError::AcceptanceNotAllowed {
            document_id,
            reason,
        } => ApiError::DomainRuleViolation {
            rule: String::from("acceptance_allowed"),
            message: format!("Document {document_id} cannot be accepted: {reason}"),
        },
    }
}
