// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_upload, create_test_user};
use crate::{
    Department, DocumentId, DomainError, NewDocument, Role, User, validate_department,
    validate_feedback, validate_new_document, validate_user_fields,
};
use time::macros::date;

#[test]
fn test_validate_feedback_accepts_text() {
    assert!(validate_feedback("Section 3 needs a legal review").is_ok());
}

#[test]
fn test_validate_feedback_rejects_empty() {
    let result: Result<(), DomainError> = validate_feedback("");
    assert!(matches!(result, Err(DomainError::InvalidFeedback(_))));
}

#[test]
fn test_validate_feedback_rejects_whitespace() {
    let result: Result<(), DomainError> = validate_feedback("   \n\t");
    assert!(matches!(result, Err(DomainError::InvalidFeedback(_))));
}

#[test]
fn test_validate_new_document_accepts_valid_upload() {
    let upload: NewDocument = create_test_upload("Remote Work Policy", "Human Resources");
    assert!(validate_new_document(&upload, date!(2024 - 01 - 18)).is_ok());
}

#[test]
fn test_validate_new_document_rejects_empty_title() {
    let upload: NewDocument = create_test_upload("  ", "Human Resources");
    let result: Result<(), DomainError> = validate_new_document(&upload, date!(2024 - 01 - 18));
    assert!(matches!(result, Err(DomainError::InvalidTitle(_))));
}

#[test]
fn test_validate_new_document_rejects_empty_department() {
    let upload: NewDocument = create_test_upload("Remote Work Policy", "");
    let result: Result<(), DomainError> = validate_new_document(&upload, date!(2024 - 01 - 18));
    assert!(matches!(result, Err(DomainError::InvalidDepartment(_))));
}

#[test]
fn test_validate_new_document_rejects_empty_explicit_id() {
    let mut upload: NewDocument = create_test_upload("Remote Work Policy", "Human Resources");
    upload.id = Some(DocumentId::new(""));
    let result: Result<(), DomainError> = validate_new_document(&upload, date!(2024 - 01 - 18));
    assert!(matches!(result, Err(DomainError::InvalidDocumentId(_))));
}

#[test]
fn test_validate_new_document_rejects_expiry_in_the_past() {
    let mut upload: NewDocument = create_test_upload("Remote Work Policy", "Human Resources");
    upload.expiry_date = Some(date!(2023 - 12 - 31));
    let result: Result<(), DomainError> = validate_new_document(&upload, date!(2024 - 01 - 18));
    assert_eq!(
        result,
        Err(DomainError::ExpiryBeforeUpload {
            expiry_date: date!(2023 - 12 - 31),
            uploaded_on: date!(2024 - 01 - 18),
        })
    );
}

#[test]
fn test_validate_user_fields_accepts_valid_user() {
    let user: User = create_test_user("1", Role::Admin, "Information Technology");
    assert!(validate_user_fields(&user).is_ok());
}

#[test]
fn test_validate_user_fields_rejects_bad_email() {
    let mut user: User = create_test_user("1", Role::Admin, "Information Technology");
    user.email = String::from("not-an-address");
    assert!(matches!(
        validate_user_fields(&user),
        Err(DomainError::InvalidEmail(_))
    ));
}

#[test]
fn test_validate_user_fields_rejects_empty_name() {
    let mut user: User = create_test_user("1", Role::Admin, "Information Technology");
    user.name = String::new();
    assert!(matches!(
        validate_user_fields(&user),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_validate_department_accepts_hex_color() {
    assert!(validate_department(&Department::new("Legal"), "#06B6D4").is_ok());
    assert!(validate_department(&Department::new("Legal"), "#a1b2c3").is_ok());
}

#[test]
fn test_validate_department_rejects_bad_colors() {
    for color in ["", "06B6D4", "#06B6D", "#06B6D44", "#GGGGGG"] {
        let result: Result<(), DomainError> = validate_department(&Department::new("Legal"), color);
        assert_eq!(result, Err(DomainError::InvalidColor(color.to_string())));
    }
}

#[test]
fn test_validate_department_rejects_blank_name() {
    let result: Result<(), DomainError> = validate_department(&Department::new("  "), "#06B6D4");
    assert!(matches!(result, Err(DomainError::InvalidDepartment(_))));
}
