// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Department, NewDocument, User};
use time::Date;

/// Validates rejection feedback.
///
/// Feedback is required for every rejection. Whitespace-only feedback
/// counts as empty.
///
/// # Errors
///
/// Returns `DomainError::InvalidFeedback` if the feedback is empty.
pub fn validate_feedback(feedback: &str) -> Result<(), DomainError> {
    if feedback.trim().is_empty() {
        return Err(DomainError::InvalidFeedback(String::from(
            "Feedback is required when rejecting a document",
        )));
    }
    Ok(())
}

/// Validates upload data before a document is created.
///
/// This function checks field constraints only. It does NOT check that an
/// explicit identifier is unique (that requires the store).
///
/// # Arguments
///
/// * `upload` - The upload data to validate
/// * `today` - The upload date, used to check the expiry date
///
/// # Errors
///
/// Returns an error if:
/// - An explicit identifier is empty
/// - The title is empty
/// - The department is empty
/// - The expiry date is before the upload date
pub fn validate_new_document(upload: &NewDocument, today: Date) -> Result<(), DomainError> {
    if let Some(id) = &upload.id
        && id.as_str().trim().is_empty()
    {
        return Err(DomainError::InvalidDocumentId(String::from(
            "Document id cannot be empty",
        )));
    }

    if upload.title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }

    if upload.department.name().trim().is_empty() {
        return Err(DomainError::InvalidDepartment(String::from(
            "Department cannot be empty",
        )));
    }

    if let Some(expiry_date) = upload.expiry_date
        && expiry_date < today
    {
        return Err(DomainError::ExpiryBeforeUpload {
            expiry_date,
            uploaded_on: today,
        });
    }

    Ok(())
}

/// Validates that a user's basic field constraints are met.
///
/// # Errors
///
/// Returns an error if the id, name, email or department is empty.
pub fn validate_user_fields(user: &User) -> Result<(), DomainError> {
    if user.id.as_str().trim().is_empty() {
        return Err(DomainError::InvalidUserId(String::from(
            "User id cannot be empty",
        )));
    }

    if user.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    if !user.email.contains('@') {
        return Err(DomainError::InvalidEmail(format!(
            "'{}' is not an email address",
            user.email
        )));
    }

    if user.department.name().trim().is_empty() {
        return Err(DomainError::InvalidDepartment(String::from(
            "Department cannot be empty",
        )));
    }

    Ok(())
}

/// Validates a department registration.
///
/// # Errors
///
/// Returns an error if the name is empty or the color is not `#RRGGBB`.
pub fn validate_department(name: &Department, color: &str) -> Result<(), DomainError> {
    if name.name().trim().is_empty() {
        return Err(DomainError::InvalidDepartment(String::from(
            "Department cannot be empty",
        )));
    }

    let is_hex_color: bool = color
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if !is_hex_color {
        return Err(DomainError::InvalidColor(color.to_string()));
    }

    Ok(())
}
