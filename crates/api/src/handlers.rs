// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Each handler translates a request into domain types, calls the engine,
//! and translates the outcome back. Errors leave through
//! `translate_core_error` and `translate_domain_error` only.

use std::str::FromStr;

use doc_approval::{
    AccessKind, ApprovalEngine, BulkAction, BulkFailure, BulkResult, DepartmentSummary,
    DispatchReport, DocumentPatch, DocumentStatistics,
};
use doc_approval_audit::AuditEvent;
use doc_approval_domain::{
    AcceptanceType, AccessType, ApprovalStatus, DEFAULT_DEPARTMENT_COLOR, Department,
    DepartmentRecord, Document, DocumentAcceptance,
    DocumentFilter, DocumentId, DocumentType, FileType, NewDocument, SortKey, SortOrder, User,
};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::auth::{AuthenticatedUser, AuthorizationService};
use crate::capabilities::{compute_document_capabilities, compute_global_capabilities};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AcceptDocumentRequest, AcceptanceInfo, AddDepartmentRequest, ApprovalRequestRequest,
    AuditEventInfo, AuditTrailResponse, BulkDecisionRequest, BulkDecisionResponse, DepartmentInfo,
    DepartmentResponse, DispatchResponse, DocumentInfo, DocumentResponse, FailedItem,
    ListAcceptancesResponse, ListDepartmentsResponse, ListDocumentsRequest, ListDocumentsResponse,
    ListUsersResponse, RejectDocumentRequest, ReminderRequest, SelectionRequest,
    SelectionResponse, StatisticsResponse, UpdateDocumentRequest, UploadDocumentRequest, UserInfo,
    WhoAmIResponse,
};

const DATE_FORMAT: &[time::format_description::FormatItem<'_>] =
    time::macros::format_description!("[year]-[month]-[day]");

fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, ApiError> {
    timestamp.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}

fn parse_date(field: &str, value: &str) -> Result<Date, ApiError> {
    Date::parse(value.trim(), DATE_FORMAT).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("Failed to parse date '{value}': {e}"),
    })
}

fn parse_field<T>(value: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = doc_approval_domain::DomainError>,
{
    value.parse().map_err(translate_domain_error)
}

fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: FromStr<Err = doc_approval_domain::DomainError>,
{
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(parse_field)
        .transpose()
}

fn to_ids(ids: &[String]) -> Vec<DocumentId> {
    ids.iter().map(|id| DocumentId::new(id)).collect()
}

fn to_strings(ids: &[DocumentId]) -> Vec<String> {
    ids.iter().map(ToString::to_string).collect()
}

fn failed_items(failures: Vec<BulkFailure>) -> Vec<FailedItem> {
    failures
        .into_iter()
        .map(|failure| FailedItem {
            document_id: failure.document_id.to_string(),
            reason: translate_core_error(failure.error).to_string(),
        })
        .collect()
}

/// Converts a directory entry into its API form.
#[must_use]
pub fn user_info(user: &User) -> UserInfo {
    UserInfo {
        id: user.id.to_string(),
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role.to_string(),
        department: user.department.to_string(),
    }
}

fn document_info(
    engine: &ApprovalEngine,
    actor: &AuthenticatedUser,
    document: &Document,
) -> Result<DocumentInfo, ApiError> {
    let has_accepted: bool = engine.has_accepted(&document.id, actor.id());

    Ok(DocumentInfo {
        id: document.id.to_string(),
        title: document.title.clone(),
        document_type: document.document_type.to_string(),
        file_type: document.file_type.to_string(),
        department: document.department.to_string(),
        uploaded_by: document.uploaded_by.to_string(),
        uploaded_at: format_timestamp(document.uploaded_at)?,
        last_modified: format_timestamp(document.last_modified)?,
        access_type: document.access_type.to_string(),
        approval_status: document.approval_status.to_string(),
        approved_by: document.approved_by.as_ref().map(ToString::to_string),
        approved_at: document.approved_at.map(format_timestamp).transpose()?,
        tags: document.tags.clone(),
        description: document.description.clone(),
        url: document.url.clone(),
        expiry_date: document.expiry_date.map(|d| d.to_string()),
        expired: document.is_expired(OffsetDateTime::now_utc().date()),
        requires_acceptance: document.requires_acceptance,
        notify_all_after_approval: document.notify_all_after_approval,
        capabilities: compute_document_capabilities(&actor.user, document, has_accepted),
    })
}

fn document_infos(
    engine: &ApprovalEngine,
    actor: &AuthenticatedUser,
    documents: &[Document],
) -> Result<Vec<DocumentInfo>, ApiError> {
    documents
        .iter()
        .map(|d| document_info(engine, actor, d))
        .collect()
}

fn acceptance_info(acceptance: &DocumentAcceptance) -> Result<AcceptanceInfo, ApiError> {
    Ok(AcceptanceInfo {
        document_id: acceptance.document_id.to_string(),
        user_id: acceptance.user_id.to_string(),
        accepted_at: format_timestamp(acceptance.accepted_at)?,
        acceptance_type: acceptance.acceptance_type.to_string(),
    })
}

fn audit_event_info(event: AuditEvent) -> Result<AuditEventInfo, ApiError> {
    Ok(AuditEventInfo {
        event_id: event.event_id,
        actor_id: event.actor.id,
        actor_type: event.actor.actor_type,
        action: event.action.name,
        details: event.action.details,
        before: event.before.data,
        after: event.after.data,
        occurred_at: format_timestamp(event.occurred_at)?,
    })
}

/// Lists every registered user.
///
/// This is the only unauthenticated call; it backs user selection at login.
#[must_use]
pub fn list_users(engine: &ApprovalEngine) -> ListUsersResponse {
    ListUsersResponse {
        users: engine.users().iter().map(user_info).collect(),
    }
}

/// Describes the calling user and their global capabilities.
#[must_use]
pub fn whoami(actor: &AuthenticatedUser) -> WhoAmIResponse {
    WhoAmIResponse {
        user: user_info(&actor.user),
        capabilities: compute_global_capabilities(&actor.user),
    }
}

/// Lists the documents visible to the caller.
///
/// # Errors
///
/// Returns an error if a filter or sort parameter cannot be parsed.
pub fn list_documents(
    engine: &ApprovalEngine,
    actor: &AuthenticatedUser,
    request: &ListDocumentsRequest,
) -> Result<ListDocumentsResponse, ApiError> {
    let filter: DocumentFilter = DocumentFilter {
        query: request.query.clone(),
        department: request
            .department
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(Department::new),
        document_type: parse_optional::<DocumentType>(request.document_type.as_deref())?,
        file_type: parse_optional::<FileType>(request.file_type.as_deref())?,
        status: parse_optional::<ApprovalStatus>(request.status.as_deref())?,
    };
    let sort: Option<SortKey> = parse_optional(request.sort.as_deref())?;
    let order: SortOrder =
        parse_optional::<SortOrder>(request.order.as_deref())?.unwrap_or_default();

    let documents: Vec<Document> = engine.list_visible(&actor.user, &filter, sort, order);
    Ok(ListDocumentsResponse {
        total: documents.len(),
        documents: document_infos(engine, actor, &documents)?,
    })
}

/// Returns one document and records the view.
///
/// # Errors
///
/// Returns an error if the document does not exist or is hidden.
pub fn get_document(
    engine: &ApprovalEngine,
    actor: &AuthenticatedUser,
    document_id: &str,
) -> Result<DocumentInfo, ApiError> {
    let document: Document = engine
        .record_access(&DocumentId::new(document_id), &actor.user, AccessKind::View)
        .map_err(translate_core_error)?;
    document_info(engine, actor, &document)
}

/// Returns one document and records the download.
///
/// # Errors
///
/// Returns an error if the document does not exist or is hidden.
pub fn download_document(
    engine: &ApprovalEngine,
    actor: &AuthenticatedUser,
    document_id: &str,
) -> Result<DocumentInfo, ApiError> {
    let document: Document = engine
        .record_access(
            &DocumentId::new(document_id),
            &actor.user,
            AccessKind::Download,
        )
        .map_err(translate_core_error)?;
    document_info(engine, actor, &document)
}

/// Uploads a document.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an Admin
/// - Any field fails to parse or validate
/// - An explicit id is already taken
pub fn upload_document(
    engine: &ApprovalEngine,
    actor: &AuthenticatedUser,
    request: UploadDocumentRequest,
) -> Result<DocumentResponse, ApiError> {
    AuthorizationService::authorize_upload(actor)?;

    let upload: NewDocument = NewDocument {
        id: request.id.as_deref().map(DocumentId::new),
        title: request.title,
        document_type: parse_field(&request.document_type)?,
        file_type: parse_field(&request.file_type)?,
        department: Department::new(request.department.trim()),
        access_type: parse_field(&request.access_type)?,
        tags: request.tags,
        description: request.description,
        url: request.url,
        expiry_date: request
            .expiry_date
            .as_deref()
            .map(|d| parse_date("expiry_date", d))
            .transpose()?,
        requires_acceptance: request.requires_acceptance,
        notify_all_after_approval: request.notify_all_after_approval,
        approval_required: request.approval_required,
    };

    let document: Document = engine
        .upload(upload, &actor.user)
        .map_err(translate_core_error)?;
    Ok(DocumentResponse {
        message: format!("Uploaded document '{}'", document.title),
        document: document_info(engine, actor, &document)?,
    })
}

/// Edits a document's descriptive fields.
///
/// # Errors
///
/// Returns an error if the caller may not edit the document or a field is
/// invalid.
pub fn update_document(
    engine: &ApprovalEngine,
    actor: &AuthenticatedUser,
    document_id: &str,
    request: UpdateDocumentRequest,
) -> Result<DocumentResponse, ApiError> {
    let expiry_date: Option<Option<Date>> = match request.expiry_date.as_deref().map(str::trim) {
        None => None,
        Some("") => Some(None),
        Some(value) => Some(Some(parse_date("expiry_date", value)?)),
    };
    let patch: DocumentPatch = DocumentPatch {
        title: request.title,
        description: request.description,
        tags: request.tags,
        url: request.url,
        access_type: parse_optional::<AccessType>(request.access_type.as_deref())?,
        expiry_date,
    };

    let document: Document = engine
        .update_document(&DocumentId::new(document_id), &actor.user, patch)
        .map_err(translate_core_error)?;
    Ok(DocumentResponse {
        message: format!("Updated document '{}'", document.title),
        document: document_info(engine, actor, &document)?,
    })
}

/// Approves a document.
///
/// # Errors
///
/// Returns an error if the document is unknown, the caller may not decide
/// it, or it is no longer pending.
pub fn approve_document(
    engine: &ApprovalEngine,
    actor: &AuthenticatedUser,
    document_id: &str,
) -> Result<DocumentResponse, ApiError> {
    let document: Document = engine
        .approve(&DocumentId::new(document_id), &actor.user)
        .map_err(translate_core_error)?;
    Ok(DocumentResponse {
        message: format!("Approved document '{}'", document.title),
        document: document_info(engine, actor, &document)?,
    })
}

/// Rejects a document with feedback.
///
/// # Errors
///
/// Returns an error if the feedback is empty, the document is unknown, the
/// caller may not decide it, or it is no longer pending.
pub fn reject_document(
    engine: &ApprovalEngine,
    actor: &AuthenticatedUser,
    document_id: &str,
    request: &RejectDocumentRequest,
) -> Result<DocumentResponse, ApiError> {
    let document: Document = engine
        .reject(&DocumentId::new(document_id), &actor.user, &request.feedback)
        .map_err(translate_core_error)?;
    Ok(DocumentResponse {
        message: format!("Rejected document '{}'", document.title),
        document: document_info(engine, actor, &document)?,
    })
}

/// Approves or rejects many documents at once.
///
/// Uses the caller's selection when the request names no documents.
/// Per-document failures are reported in the response, not as an error.
///
/// # Errors
///
/// Returns an error if the caller is an Employee or a rejection has no
/// feedback.
pub fn bulk_decide(
    engine: &ApprovalEngine,
    actor: &AuthenticatedUser,
    request: &BulkDecisionRequest,
) -> Result<BulkDecisionResponse, ApiError> {
    AuthorizationService::authorize_bulk_decision(actor)?;

    let feedback: Option<&str> = request.feedback.as_deref();
    let result: BulkResult = match &request.document_ids {
        Some(ids) => engine.bulk_apply(request.action, &to_ids(ids), &actor.user, feedback),
        None => engine.bulk_apply_selection(request.action, &actor.user, feedback),
    }
    .map_err(translate_core_error)?;

    let message: String = format!(
        "{} {} document(s), {} failed",
        match request.action {
            BulkAction::Approve => "Approved",
            BulkAction::Reject => "Rejected",
        },
        result.succeeded.len(),
        result.failed.len()
    );
    info!(actor = %actor.id(), %message, "Bulk decision");

    Ok(BulkDecisionResponse {
        succeeded: to_strings(&result.succeeded),
        failed: failed_items(result.failed),
        selection: to_strings(&engine.selection(actor.id())),
        message,
    })
}

fn dispatch_response(report: DispatchReport, what: &str) -> DispatchResponse {
    DispatchResponse {
        message: format!("{what} sent for {} document(s)", report.dispatched.len()),
        dispatched: to_strings(&report.dispatched),
        failed: failed_items(report.failed),
    }
}

/// Asks each document's department manager to review it.
#[must_use]
pub fn request_approval(
    engine: &ApprovalEngine,
    actor: &AuthenticatedUser,
    request: &ApprovalRequestRequest,
) -> DispatchResponse {
    let report: DispatchReport = engine.send_approval_request(
        &to_ids(&request.document_ids),
        &actor.user,
        request.is_individual,
    );
    dispatch_response(report, "Approval request")
}

/// Reminds each document's department manager that it awaits review.
#[must_use]
pub fn send_reminder(
    engine: &ApprovalEngine,
    actor: &AuthenticatedUser,
    request: &ReminderRequest,
) -> DispatchResponse {
    let report: DispatchReport =
        engine.send_reminder(&to_ids(&request.document_ids), &actor.user);
    dispatch_response(report, "Reminder")
}

/// Records the caller's acceptance of a document.
///
/// # Errors
///
/// Returns an error if the acceptance type is unknown or the document
/// cannot be accepted by the caller.
pub fn accept_document(
    engine: &ApprovalEngine,
    actor: &AuthenticatedUser,
    document_id: &str,
    request: &AcceptDocumentRequest,
) -> Result<AcceptanceInfo, ApiError> {
    let acceptance_type: AcceptanceType = parse_field(&request.acceptance_type)?;
    let acceptance: DocumentAcceptance = engine
        .accept(&DocumentId::new(document_id), &actor.user, acceptance_type)
        .map_err(translate_core_error)?;
    acceptance_info(&acceptance)
}

/// Lists every acceptance of a document.
///
/// # Errors
///
/// Returns an error if the document does not exist or is hidden.
pub fn list_acceptances(
    engine: &ApprovalEngine,
    actor: &AuthenticatedUser,
    document_id: &str,
) -> Result<ListAcceptancesResponse, ApiError> {
    let acceptances: Vec<DocumentAcceptance> = engine
        .acceptances_for(&DocumentId::new(document_id), &actor.user)
        .map_err(translate_core_error)?;
    Ok(ListAcceptancesResponse {
        document_id: document_id.to_string(),
        acceptances: acceptances
            .iter()
            .map(acceptance_info)
            .collect::<Result<_, _>>()?,
    })
}

/// Lists approved documents the caller must still accept.
///
/// # Errors
///
/// Returns an error if a timestamp cannot be formatted.
pub fn list_pending_acceptances(
    engine: &ApprovalEngine,
    actor: &AuthenticatedUser,
) -> Result<ListDocumentsResponse, ApiError> {
    let documents: Vec<Document> = engine.pending_acceptances(&actor.user);
    Ok(ListDocumentsResponse {
        total: documents.len(),
        documents: document_infos(engine, actor, &documents)?,
    })
}

/// Returns a document's history.
///
/// # Errors
///
/// Returns an error if the document does not exist, is hidden, or the
/// caller is an Employee.
pub fn get_audit_trail(
    engine: &ApprovalEngine,
    actor: &AuthenticatedUser,
    document_id: &str,
) -> Result<AuditTrailResponse, ApiError> {
    let events: Vec<AuditEvent> = engine
        .audit_trail(&DocumentId::new(document_id), &actor.user)
        .map_err(translate_core_error)?;
    Ok(AuditTrailResponse {
        document_id: document_id.to_string(),
        events: events
            .into_iter()
            .map(audit_event_info)
            .collect::<Result<_, _>>()?,
    })
}

/// Returns the caller's selection.
#[must_use]
pub fn get_selection(engine: &ApprovalEngine, actor: &AuthenticatedUser) -> SelectionResponse {
    SelectionResponse {
        document_ids: to_strings(&engine.selection(actor.id())),
    }
}

/// Selects or deselects one document.
///
/// # Errors
///
/// Returns an error if a document being selected does not exist or is
/// hidden.
pub fn update_selection(
    engine: &ApprovalEngine,
    actor: &AuthenticatedUser,
    request: &SelectionRequest,
) -> Result<SelectionResponse, ApiError> {
    let ids: Vec<DocumentId> = engine
        .toggle_selection(
            &actor.user,
            &DocumentId::new(&request.document_id),
            request.selected,
        )
        .map_err(translate_core_error)?;
    Ok(SelectionResponse {
        document_ids: to_strings(&ids),
    })
}

/// Empties the caller's selection.
#[must_use]
pub fn clear_selection(engine: &ApprovalEngine, actor: &AuthenticatedUser) -> SelectionResponse {
    engine.clear_selection(actor.id());
    SelectionResponse {
        document_ids: Vec::new(),
    }
}

/// Counts the documents visible to the caller.
#[must_use]
pub fn get_statistics(engine: &ApprovalEngine, actor: &AuthenticatedUser) -> StatisticsResponse {
    let stats: DocumentStatistics = engine.statistics(&actor.user);
    StatisticsResponse {
        total: stats.total,
        pending: stats.pending,
        approved: stats.approved,
        rejected: stats.rejected,
        public: stats.public,
        departments: stats.departments,
        recent_uploads: stats.recent_uploads,
        my_department: stats.my_department,
    }
}

fn department_info(department: DepartmentRecord, document_count: usize) -> DepartmentInfo {
    DepartmentInfo {
        id: department.id,
        name: department.name.to_string(),
        color: department.color,
        document_count,
    }
}

/// Lists departments with the caller's visible document counts.
#[must_use]
pub fn list_departments(
    engine: &ApprovalEngine,
    actor: &AuthenticatedUser,
) -> ListDepartmentsResponse {
    ListDepartmentsResponse {
        departments: engine
            .departments(&actor.user)
            .into_iter()
            .map(|summary: DepartmentSummary| {
                department_info(summary.department, summary.document_count)
            })
            .collect(),
    }
}

/// Registers a department.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an Admin
/// - The name is empty or the color is not `#RRGGBB`
/// - The name is already registered
pub fn add_department(
    engine: &ApprovalEngine,
    actor: &AuthenticatedUser,
    request: AddDepartmentRequest,
) -> Result<DepartmentResponse, ApiError> {
    AuthorizationService::authorize_manage_departments(actor)?;

    let color: String = request
        .color
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_DEPARTMENT_COLOR.to_string());
    let record: DepartmentRecord = engine
        .add_department(&actor.user, Department::new(request.name.trim()), color)
        .map_err(translate_core_error)?;
    let document_count: usize = engine
        .list_visible(
            &actor.user,
            &DocumentFilter {
                department: Some(record.name.clone()),
                ..DocumentFilter::default()
            },
            None,
            SortOrder::default(),
        )
        .len();

    Ok(DepartmentResponse {
        message: format!("Department '{}' added", record.name),
        department: department_info(record, document_count),
    })
}
