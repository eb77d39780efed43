// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AuthenticatedUser, UploadDocumentRequest};
use doc_approval::{ApprovalEngine, EngineConfig, RecordingDispatcher};
use doc_approval_domain::{Department, Role, User, UserId};
use std::sync::Arc;

pub const HR: &str = "Human Resources";
pub const IT: &str = "Information Technology";

pub fn create_test_user(id: &str, role: Role, department: &str) -> User {
    User::new(
        UserId::new(id),
        format!("User {id}"),
        format!("{id}@example.com"),
        role,
        Department::new(department),
    )
}

pub fn admin() -> AuthenticatedUser {
    AuthenticatedUser::new(create_test_user("admin", Role::Admin, IT))
}

pub fn hr_manager() -> AuthenticatedUser {
    AuthenticatedUser::new(create_test_user("hr-manager", Role::Manager, HR))
}

pub fn hr_employee() -> AuthenticatedUser {
    AuthenticatedUser::new(create_test_user("hr-employee", Role::Employee, HR))
}

pub fn create_test_engine() -> (ApprovalEngine, Arc<RecordingDispatcher>) {
    let dispatcher: Arc<RecordingDispatcher> = Arc::new(RecordingDispatcher::new());
    let engine: ApprovalEngine = ApprovalEngine::new(EngineConfig::default(), dispatcher.clone());
    for user in [admin(), hr_manager(), hr_employee()] {
        engine.register_user(user.user).unwrap();
    }
    (engine, dispatcher)
}

pub fn create_upload_request(id: &str, department: &str) -> UploadDocumentRequest {
    UploadDocumentRequest {
        id: Some(id.to_string()),
        title: format!("Document {id}"),
        document_type: String::from("Policy"),
        file_type: String::from("pdf"),
        department: department.to_string(),
        access_type: String::from("public"),
        tags: vec![String::from("policy")],
        description: String::from("A test document"),
        url: format!("/files/{id}.pdf"),
        expiry_date: None,
        requires_acceptance: false,
        notify_all_after_approval: false,
        approval_required: true,
    }
}
