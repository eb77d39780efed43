// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ApprovalEngine, EngineConfig, RecordingDispatcher};
use doc_approval_audit::Cause;
use doc_approval_domain::{
    AccessType, Department, Document, DocumentId, DocumentType, FileType, NewDocument, Role, User,
    UserId,
};
use std::sync::Arc;
use time::OffsetDateTime;
use time::macros::datetime;

pub const HR: &str = "Human Resources";
pub const IT: &str = "Information Technology";

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-test"), String::from("Test request"))
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2024-03-01 12:00 UTC)
}

pub fn create_test_user(id: &str, role: Role, department: &str) -> User {
    User::new(
        UserId::new(id),
        format!("User {id}"),
        format!("{id}@example.com"),
        role,
        Department::new(department),
    )
}

pub fn admin() -> User {
    create_test_user("admin", Role::Admin, IT)
}

pub fn hr_manager() -> User {
    create_test_user("hr-manager", Role::Manager, HR)
}

pub fn it_manager() -> User {
    create_test_user("it-manager", Role::Manager, IT)
}

pub fn hr_employee() -> User {
    create_test_user("hr-employee", Role::Employee, HR)
}

pub fn create_test_upload(id: &str, department: &str) -> NewDocument {
    NewDocument {
        id: Some(DocumentId::new(id)),
        title: format!("Document {id}"),
        document_type: DocumentType::Policy,
        file_type: FileType::Pdf,
        department: Department::new(department),
        access_type: AccessType::Public,
        tags: vec![String::from("policy")],
        description: format!("Description of {id}"),
        url: format!("/files/{id}.pdf"),
        expiry_date: None,
        requires_acceptance: false,
        notify_all_after_approval: false,
        approval_required: true,
    }
}

pub fn create_pending_document(id: &str, department: &str) -> Document {
    Document::from_upload(
        DocumentId::new(id),
        create_test_upload(id, department),
        UserId::new("admin"),
        datetime!(2024-01-15 09:00 UTC),
    )
}

pub struct Fixture {
    pub engine: ApprovalEngine,
    pub dispatcher: Arc<RecordingDispatcher>,
}

/// An engine with an admin, one manager per department, and an HR employee.
pub fn create_test_engine() -> Fixture {
    let dispatcher: Arc<RecordingDispatcher> = Arc::new(RecordingDispatcher::new());
    let engine: ApprovalEngine = ApprovalEngine::new(EngineConfig::default(), dispatcher.clone());
    for user in [admin(), hr_manager(), it_manager(), hr_employee()] {
        engine.register_user(user).unwrap();
    }
    Fixture { engine, dispatcher }
}

/// Uploads a pending document as the admin.
pub fn upload_pending(engine: &ApprovalEngine, id: &str, department: &str) -> DocumentId {
    engine
        .upload(create_test_upload(id, department), &admin())
        .unwrap()
        .id
}
