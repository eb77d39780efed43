// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Rejection feedback is empty or invalid.
    #[error("Invalid feedback: {0}")]
    InvalidFeedback(String),
    /// Document title is empty or invalid.
    #[error("Invalid title: {0}")]
    InvalidTitle(String),
    /// Department name is empty or invalid.
    #[error("Invalid department: {0}")]
    InvalidDepartment(String),
    /// Department color is not a `#RRGGBB` value.
    #[error("Invalid color: '{0}'. Must look like '#RRGGBB'")]
    InvalidColor(String),
    /// Document identifier is empty or invalid.
    #[error("Invalid document id: {0}")]
    InvalidDocumentId(String),
    /// User identifier is empty or invalid.
    #[error("Invalid user id: {0}")]
    InvalidUserId(String),
    /// User name is empty or invalid.
    #[error("Invalid name: {0}")]
    InvalidName(String),
    /// User email is empty or invalid.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),
    /// Role string could not be parsed.
    #[error("Invalid role: '{0}'. Must be 'admin', 'manager' or 'employee'")]
    InvalidRole(String),
    /// Approval status string could not be parsed.
    #[error("Invalid approval status: '{0}'")]
    InvalidApprovalStatus(String),
    /// Access type string could not be parsed.
    #[error("Invalid access type: '{0}'")]
    InvalidAccessType(String),
    /// Document type string could not be parsed.
    #[error("Invalid document type: '{0}'")]
    InvalidDocumentType(String),
    /// File type string could not be parsed.
    #[error("Invalid file type: '{0}'")]
    InvalidFileType(String),
    /// Acceptance type string could not be parsed.
    #[error("Invalid acceptance type: '{0}'")]
    InvalidAcceptanceType(String),
    /// Sort key string could not be parsed.
    #[error("Invalid sort key: '{0}'")]
    InvalidSortKey(String),
    /// Sort order string could not be parsed.
    #[error("Invalid sort order: '{0}'")]
    InvalidSortOrder(String),
    /// Expiry date precedes the upload date.
    #[error("Expiry date {expiry_date} is before upload date {uploaded_on}")]
    ExpiryBeforeUpload {
        /// The requested expiry date.
        expiry_date: time::Date,
        /// The date the document was uploaded.
        uploaded_on: time::Date,
    },
}
