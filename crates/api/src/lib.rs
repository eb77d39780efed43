// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod capabilities;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedUser, AuthenticationService, AuthorizationService};
pub use capabilities::{compute_document_capabilities, compute_global_capabilities};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use handlers::{
    accept_document, add_department, approve_document, bulk_decide, clear_selection,
    download_document, get_audit_trail, get_document, get_selection, get_statistics,
    list_acceptances, list_departments, list_documents, list_pending_acceptances, list_users,
    reject_document, request_approval, send_reminder, update_document, update_selection,
    upload_document, user_info, whoami,
};
pub use request_response::{
    AcceptDocumentRequest, AcceptanceInfo, AddDepartmentRequest, ApprovalRequestRequest,
    AuditEventInfo, AuditTrailResponse, BulkDecisionRequest, BulkDecisionResponse, Capability,
    DepartmentInfo, DepartmentResponse, DispatchResponse, DocumentCapabilities, DocumentInfo,
    DocumentResponse, FailedItem, GlobalCapabilities, ListAcceptancesResponse,
    ListDepartmentsResponse, ListDocumentsRequest, ListDocumentsResponse, ListUsersResponse,
    RejectDocumentRequest, ReminderRequest, SelectionRequest, SelectionResponse,
    StatisticsResponse, UpdateDocumentRequest, UploadDocumentRequest, UserInfo, WhoAmIResponse,
};
