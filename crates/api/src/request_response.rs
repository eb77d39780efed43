// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Enumerations travel as strings and timestamps as RFC 3339 strings; the
//! handlers parse and format them.

use doc_approval::BulkAction;

/// Represents whether a specific action is permitted.
///
/// This enum provides better type safety than raw booleans and serializes
/// to JSON as true/false for API compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl serde::Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> serde::Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let b = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(b))
    }
}

/// What a user may do regardless of any particular document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GlobalCapabilities {
    /// Whether the user may upload documents.
    pub can_upload: Capability,
    /// Whether the user may run bulk approvals or rejections.
    pub can_bulk_decide: Capability,
    /// Whether the user may read document history.
    pub can_view_history: Capability,
    /// Whether the user may add departments.
    pub can_manage_departments: Capability,
}

/// What a user may do with one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DocumentCapabilities {
    /// Whether the user may approve the document now.
    pub can_approve: Capability,
    /// Whether the user may reject the document now.
    pub can_reject: Capability,
    /// Whether the user may edit the document's descriptive fields.
    pub can_edit: Capability,
    /// Whether the user may accept the document now.
    pub can_accept: Capability,
    /// Whether the user may request approval or send a reminder.
    pub can_request_approval: Capability,
    /// Whether the user may read the document's history.
    pub can_view_history: Capability,
}

/// A directory entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserInfo {
    /// The user's identifier, also used as the bearer token.
    pub id: String,
    /// The display name.
    pub name: String,
    /// The notification address.
    pub email: String,
    /// The role: admin, manager or employee.
    pub role: String,
    /// The department name.
    pub department: String,
}

/// API response listing every user.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListUsersResponse {
    /// Every registered user, in registration order.
    pub users: Vec<UserInfo>,
}

/// API response describing the calling user.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WhoAmIResponse {
    /// The calling user.
    pub user: UserInfo,
    /// What the calling user may do.
    pub capabilities: GlobalCapabilities,
}

/// A document as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DocumentInfo {
    pub id: String,
    pub title: String,
    pub document_type: String,
    pub file_type: String,
    pub department: String,
    pub uploaded_by: String,
    /// RFC 3339 timestamp.
    pub uploaded_at: String,
    /// RFC 3339 timestamp.
    pub last_modified: String,
    pub access_type: String,
    pub approval_status: String,
    pub approved_by: Option<String>,
    /// RFC 3339 timestamp.
    pub approved_at: Option<String>,
    pub tags: Vec<String>,
    pub description: String,
    pub url: String,
    /// `YYYY-MM-DD`.
    pub expiry_date: Option<String>,
    /// Whether the expiry date has passed. Expired documents stay listed.
    pub expired: bool,
    pub requires_acceptance: bool,
    pub notify_all_after_approval: bool,
    /// What the calling user may do with this document.
    pub capabilities: DocumentCapabilities,
}

/// Query parameters for listing documents.
///
/// Every field is optional; an absent field does not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListDocumentsRequest {
    /// Case-insensitive search over title, description and tags.
    pub query: Option<String>,
    pub department: Option<String>,
    pub document_type: Option<String>,
    pub file_type: Option<String>,
    pub status: Option<String>,
    /// `department`, `file_type` or `date`.
    pub sort: Option<String>,
    /// `asc` or `desc`.
    pub order: Option<String>,
}

/// API response listing documents.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListDocumentsResponse {
    /// The matching documents, in the requested order.
    pub documents: Vec<DocumentInfo>,
    /// The number of matching documents.
    pub total: usize,
}

fn default_true() -> bool {
    true
}

/// API request to upload a document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UploadDocumentRequest {
    /// An explicit identifier. One is generated when absent.
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub document_type: String,
    pub file_type: String,
    pub department: String,
    pub access_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub requires_acceptance: bool,
    #[serde(default)]
    pub notify_all_after_approval: bool,
    /// When false the document is created already approved.
    #[serde(default = "default_true")]
    pub approval_required: bool,
}

/// API request to edit a document's descriptive fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub url: Option<String>,
    pub access_type: Option<String>,
    /// `YYYY-MM-DD`, or an empty string to clear the expiry date.
    pub expiry_date: Option<String>,
}

/// API response carrying a single document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DocumentResponse {
    /// The document after the operation.
    pub document: DocumentInfo,
    /// A success message.
    pub message: String,
}

/// API request to reject a document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RejectDocumentRequest {
    /// Why the document is rejected. Must not be empty.
    pub feedback: String,
}

/// API request for a bulk approval or rejection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BulkDecisionRequest {
    /// The decision to apply.
    pub action: BulkAction,
    /// The documents to decide. The caller's selection is used when absent.
    #[serde(default)]
    pub document_ids: Option<Vec<String>>,
    /// Shared feedback, required for rejections.
    #[serde(default)]
    pub feedback: Option<String>,
}

/// A document a multi-document call could not process.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FailedItem {
    /// The document that failed.
    pub document_id: String,
    /// Why it failed.
    pub reason: String,
}

/// API response for a bulk approval or rejection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BulkDecisionResponse {
    /// The documents that transitioned.
    pub succeeded: Vec<String>,
    /// The documents that did not, with the reason.
    pub failed: Vec<FailedItem>,
    /// The caller's selection after the call.
    pub selection: Vec<String>,
    /// A summary message.
    pub message: String,
}

/// API request to ask department managers for approval.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ApprovalRequestRequest {
    pub document_ids: Vec<String>,
    /// A single-document request leaves the selection alone.
    #[serde(default)]
    pub is_individual: bool,
}

/// API request to remind department managers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReminderRequest {
    pub document_ids: Vec<String>,
}

/// API response for an approval request or reminder.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DispatchResponse {
    /// Documents a notification was sent for.
    pub dispatched: Vec<String>,
    /// Documents that were skipped, with the reason.
    pub failed: Vec<FailedItem>,
    /// A summary message.
    pub message: String,
}

/// API request to accept a document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AcceptDocumentRequest {
    /// `signed` or `acknowledged`.
    pub acceptance_type: String,
}

/// An acceptance as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AcceptanceInfo {
    pub document_id: String,
    pub user_id: String,
    /// RFC 3339 timestamp.
    pub accepted_at: String,
    pub acceptance_type: String,
}

/// API response listing acceptances of a document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListAcceptancesResponse {
    pub document_id: String,
    pub acceptances: Vec<AcceptanceInfo>,
}

/// An audit event as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditEventInfo {
    pub event_id: Option<u64>,
    pub actor_id: String,
    pub actor_type: String,
    pub action: String,
    pub details: Option<String>,
    pub before: String,
    pub after: String,
    /// RFC 3339 timestamp.
    pub occurred_at: String,
}

/// API response carrying a document's history.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditTrailResponse {
    pub document_id: String,
    /// Events, oldest first.
    pub events: Vec<AuditEventInfo>,
}

/// API request to select or deselect a document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SelectionRequest {
    pub document_id: String,
    pub selected: bool,
}

/// API response carrying the caller's selection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SelectionResponse {
    /// Selected ids, sorted.
    pub document_ids: Vec<String>,
}

/// API response carrying document counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StatisticsResponse {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub public: usize,
    /// Distinct departments among the visible documents.
    pub departments: usize,
    /// Uploaded within the last week.
    pub recent_uploads: usize,
    /// Belonging to the caller's department.
    pub my_department: usize,
}

/// A department as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DepartmentInfo {
    pub id: String,
    pub name: String,
    /// `#RRGGBB`.
    pub color: String,
    /// Documents in this department visible to the caller.
    pub document_count: usize,
}

/// API response listing departments.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListDepartmentsResponse {
    /// Registered departments first, then unregistered ones that have
    /// visible documents.
    pub departments: Vec<DepartmentInfo>,
}

/// API request to add a department.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AddDepartmentRequest {
    pub name: String,
    /// `#RRGGBB`. A neutral gray is used when absent.
    #[serde(default)]
    pub color: Option<String>,
}

/// API response for an added department.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DepartmentResponse {
    pub department: DepartmentInfo,
    /// A success message.
    pub message: String,
}
