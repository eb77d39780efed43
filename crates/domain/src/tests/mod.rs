// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod validation;

use crate::{
    AccessType, Department, Document, DocumentId, DocumentType, FileType, NewDocument, Role, User,
    UserId,
};
use time::macros::datetime;

pub fn create_test_user(id: &str, role: Role, department: &str) -> User {
    User::new(
        UserId::new(id),
        format!("User {id}"),
        format!("user{id}@example.com"),
        role,
        Department::new(department),
    )
}

pub fn create_test_upload(title: &str, department: &str) -> NewDocument {
    NewDocument {
        id: None,
        title: title.to_string(),
        document_type: DocumentType::Policy,
        file_type: FileType::Pdf,
        department: Department::new(department),
        access_type: AccessType::Public,
        tags: vec![String::from("policy"), String::from("hr")],
        description: format!("Description of {title}"),
        url: String::from("/documents/test.pdf"),
        expiry_date: None,
        requires_acceptance: false,
        notify_all_after_approval: false,
        approval_required: true,
    }
}

pub fn create_test_document(id: &str, department: &str, access_type: AccessType) -> Document {
    let mut upload: NewDocument = create_test_upload(&format!("Document {id}"), department);
    upload.access_type = access_type;
    Document::from_upload(
        DocumentId::new(id),
        upload,
        UserId::new("uploader"),
        datetime!(2024-01-15 09:00 UTC),
    )
}
