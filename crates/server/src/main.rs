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
#![allow(clippy::multiple_crate_versions)]

mod live;
mod seed;
mod session;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use doc_approval::{ApprovalEngine, DEFAULT_MANAGER_ADDRESS, EngineConfig};
use doc_approval_api::{
    AcceptDocumentRequest, AcceptanceInfo, AddDepartmentRequest, ApiError, ApprovalRequestRequest,
    AuditTrailResponse, BulkDecisionRequest, BulkDecisionResponse, DepartmentResponse,
    DispatchResponse, DocumentInfo, DocumentResponse, ListAcceptancesResponse,
    ListDepartmentsResponse, ListDocumentsRequest, ListDocumentsResponse, ListUsersResponse,
    RejectDocumentRequest, ReminderRequest, SelectionRequest, SelectionResponse,
    StatisticsResponse, UpdateDocumentRequest, UploadDocumentRequest, WhoAmIResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::live::{BroadcastDispatcher, LiveEventBroadcaster, live_events_handler};
use crate::session::SessionUser;

/// Document Approval Server - HTTP server for the document approval service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Recipient for approval requests when a department has no manager
    #[arg(long, default_value = DEFAULT_MANAGER_ADDRESS)]
    default_manager_address: String,

    /// Load the demo users and documents on startup
    #[arg(long)]
    seed: bool,
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The approval engine. It synchronizes internally.
    pub engine: Arc<ApprovalEngine>,
    /// Fan-out for the `/live` websocket stream.
    pub live: Arc<LiveEventBroadcaster>,
}

impl AppState {
    /// Builds an empty engine whose notifications are logged and streamed
    /// to live clients.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let live: Arc<LiveEventBroadcaster> = Arc::new(LiveEventBroadcaster::new());
        let dispatcher: Arc<BroadcastDispatcher> =
            Arc::new(BroadcastDispatcher::new(Arc::clone(&live)));
        Self {
            engine: Arc::new(ApprovalEngine::new(config, dispatcher)),
            live,
        }
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error indicator.
    pub error: bool,
    /// Error message.
    pub message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    pub const fn new(status: StatusCode, message: String) -> Self {
        Self { status, message }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::CONFLICT,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %err, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %err, "Request rejected");
        }
        Self::new(status, err.to_string())
    }
}

/// Handler for GET `/users`. Unauthenticated; backs login selection.
async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
) -> Json<ListUsersResponse> {
    Json(doc_approval_api::list_users(&app_state.engine))
}

/// Handler for GET `/whoami`.
async fn handle_whoami(SessionUser(actor): SessionUser) -> Json<WhoAmIResponse> {
    Json(doc_approval_api::whoami(&actor))
}

/// Handler for GET `/documents`.
async fn handle_list_documents(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Query(query): Query<ListDocumentsRequest>,
) -> Result<Json<ListDocumentsResponse>, HttpError> {
    Ok(Json(doc_approval_api::list_documents(
        &app_state.engine,
        &actor,
        &query,
    )?))
}

/// Handler for POST `/documents`.
async fn handle_upload_document(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Json(req): Json<UploadDocumentRequest>,
) -> Result<Json<DocumentResponse>, HttpError> {
    info!(actor = %actor.id(), title = %req.title, "Handling upload request");
    let response: DocumentResponse =
        doc_approval_api::upload_document(&app_state.engine, &actor, req)?;
    info!(document_id = %response.document.id, "Document uploaded");
    Ok(Json(response))
}

/// Handler for GET `/documents/{id}`. Records a view.
async fn handle_get_document(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(document_id): Path<String>,
) -> Result<Json<DocumentInfo>, HttpError> {
    Ok(Json(doc_approval_api::get_document(
        &app_state.engine,
        &actor,
        &document_id,
    )?))
}

/// Handler for PATCH `/documents/{id}`.
async fn handle_update_document(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(document_id): Path<String>,
    Json(req): Json<UpdateDocumentRequest>,
) -> Result<Json<DocumentResponse>, HttpError> {
    info!(actor = %actor.id(), %document_id, "Handling update request");
    Ok(Json(doc_approval_api::update_document(
        &app_state.engine,
        &actor,
        &document_id,
        req,
    )?))
}

/// Handler for POST `/documents/{id}/download`. Records a download.
async fn handle_download_document(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(document_id): Path<String>,
) -> Result<Json<DocumentInfo>, HttpError> {
    Ok(Json(doc_approval_api::download_document(
        &app_state.engine,
        &actor,
        &document_id,
    )?))
}

/// Handler for POST `/documents/{id}/approve`.
async fn handle_approve(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(document_id): Path<String>,
) -> Result<Json<DocumentResponse>, HttpError> {
    info!(actor = %actor.id(), %document_id, "Handling approve request");
    Ok(Json(doc_approval_api::approve_document(
        &app_state.engine,
        &actor,
        &document_id,
    )?))
}

/// Handler for POST `/documents/{id}/reject`.
async fn handle_reject(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(document_id): Path<String>,
    Json(req): Json<RejectDocumentRequest>,
) -> Result<Json<DocumentResponse>, HttpError> {
    info!(actor = %actor.id(), %document_id, "Handling reject request");
    Ok(Json(doc_approval_api::reject_document(
        &app_state.engine,
        &actor,
        &document_id,
        &req,
    )?))
}

/// Handler for POST `/documents/bulk`.
async fn handle_bulk_decision(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Json(req): Json<BulkDecisionRequest>,
) -> Result<Json<BulkDecisionResponse>, HttpError> {
    info!(actor = %actor.id(), action = req.action.as_str(), "Handling bulk decision");
    Ok(Json(doc_approval_api::bulk_decide(
        &app_state.engine,
        &actor,
        &req,
    )?))
}

/// Handler for POST `/approval_requests`.
async fn handle_request_approval(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Json(req): Json<ApprovalRequestRequest>,
) -> Json<DispatchResponse> {
    info!(
        actor = %actor.id(),
        documents = req.document_ids.len(),
        is_individual = req.is_individual,
        "Handling approval request"
    );
    Json(doc_approval_api::request_approval(
        &app_state.engine,
        &actor,
        &req,
    ))
}

/// Handler for POST `/reminders`.
async fn handle_send_reminder(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Json(req): Json<ReminderRequest>,
) -> Json<DispatchResponse> {
    info!(actor = %actor.id(), documents = req.document_ids.len(), "Handling reminder");
    Json(doc_approval_api::send_reminder(
        &app_state.engine,
        &actor,
        &req,
    ))
}

/// Handler for POST `/documents/{id}/accept`.
async fn handle_accept(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(document_id): Path<String>,
    Json(req): Json<AcceptDocumentRequest>,
) -> Result<Json<AcceptanceInfo>, HttpError> {
    Ok(Json(doc_approval_api::accept_document(
        &app_state.engine,
        &actor,
        &document_id,
        &req,
    )?))
}

/// Handler for GET `/documents/{id}/acceptances`.
async fn handle_list_acceptances(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(document_id): Path<String>,
) -> Result<Json<ListAcceptancesResponse>, HttpError> {
    Ok(Json(doc_approval_api::list_acceptances(
        &app_state.engine,
        &actor,
        &document_id,
    )?))
}

/// Handler for GET `/acceptances/pending`.
async fn handle_pending_acceptances(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
) -> Result<Json<ListDocumentsResponse>, HttpError> {
    Ok(Json(doc_approval_api::list_pending_acceptances(
        &app_state.engine,
        &actor,
    )?))
}

/// Handler for GET `/documents/{id}/audit`.
async fn handle_audit_trail(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(document_id): Path<String>,
) -> Result<Json<AuditTrailResponse>, HttpError> {
    Ok(Json(doc_approval_api::get_audit_trail(
        &app_state.engine,
        &actor,
        &document_id,
    )?))
}

/// Handler for GET `/selection`.
async fn handle_get_selection(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
) -> Json<SelectionResponse> {
    Json(doc_approval_api::get_selection(&app_state.engine, &actor))
}

/// Handler for POST `/selection`.
async fn handle_update_selection(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Json(req): Json<SelectionRequest>,
) -> Result<Json<SelectionResponse>, HttpError> {
    Ok(Json(doc_approval_api::update_selection(
        &app_state.engine,
        &actor,
        &req,
    )?))
}

/// Handler for DELETE `/selection`.
async fn handle_clear_selection(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
) -> Json<SelectionResponse> {
    Json(doc_approval_api::clear_selection(&app_state.engine, &actor))
}

/// Handler for GET `/statistics`.
async fn handle_statistics(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
) -> Json<StatisticsResponse> {
    Json(doc_approval_api::get_statistics(&app_state.engine, &actor))
}

/// Handler for GET `/departments`.
async fn handle_list_departments(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
) -> Json<ListDepartmentsResponse> {
    Json(doc_approval_api::list_departments(&app_state.engine, &actor))
}

/// Handler for POST `/departments`.
async fn handle_add_department(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Json(req): Json<AddDepartmentRequest>,
) -> Result<Json<DepartmentResponse>, HttpError> {
    info!(actor = %actor.id(), name = %req.name, "Handling add department request");
    Ok(Json(doc_approval_api::add_department(
        &app_state.engine,
        &actor,
        req,
    )?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/users", get(handle_list_users))
        .route("/whoami", get(handle_whoami))
        .route(
            "/documents",
            get(handle_list_documents).post(handle_upload_document),
        )
        .route("/documents/bulk", post(handle_bulk_decision))
        .route(
            "/documents/{id}",
            get(handle_get_document).patch(handle_update_document),
        )
        .route("/documents/{id}/download", post(handle_download_document))
        .route("/documents/{id}/approve", post(handle_approve))
        .route("/documents/{id}/reject", post(handle_reject))
        .route("/documents/{id}/accept", post(handle_accept))
        .route("/documents/{id}/acceptances", get(handle_list_acceptances))
        .route("/documents/{id}/audit", get(handle_audit_trail))
        .route("/approval_requests", post(handle_request_approval))
        .route("/reminders", post(handle_send_reminder))
        .route(
            "/selection",
            get(handle_get_selection)
                .post(handle_update_selection)
                .delete(handle_clear_selection),
        )
        .route(
            "/departments",
            get(handle_list_departments).post(handle_add_department),
        )
        .route("/statistics", get(handle_statistics))
        .route("/acceptances/pending", get(handle_pending_acceptances))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing document approval server");

    let app_state: AppState = AppState::new(EngineConfig {
        default_manager_address: args.default_manager_address,
    });

    if args.seed {
        seed::load(&app_state.engine)?;
    }

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
