// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::http::StatusCode;
use doc_approval::{BulkAction, DEFAULT_MANAGER_ADDRESS, NotificationEvent, Recipient};
use doc_approval_api::{
    AcceptDocumentRequest, AddDepartmentRequest, ApprovalRequestRequest, AuditTrailResponse,
    BulkDecisionRequest, BulkDecisionResponse, DepartmentResponse, DispatchResponse, DocumentInfo,
    DocumentResponse, ListDepartmentsResponse, ListDocumentsResponse, ListUsersResponse,
    RejectDocumentRequest, ReminderRequest, SelectionRequest, SelectionResponse,
    StatisticsResponse, UpdateDocumentRequest, WhoAmIResponse,
};
use doc_approval_domain::UserId;

use crate::ErrorResponse;
use crate::live::LiveEvent;
use crate::tests::helpers::{
    ADMIN, HR_EMPLOYEE, HR_MANAGER, create_seeded_app, json_request, read_json, request, send,
};

#[tokio::test]
async fn test_list_users_needs_no_token() {
    let (_, app) = create_seeded_app();

    let response = send(&app, request("GET", "/users", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let users: ListUsersResponse = read_json(response).await;
    assert_eq!(users.users.len(), 3);
    assert_eq!(users.users[0].name, "Sarah Johnson");
}

#[tokio::test]
async fn test_authenticated_routes_require_known_bearer() {
    let (_, app) = create_seeded_app();

    let missing = send(&app, request("GET", "/whoami", None)).await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let unknown = send(&app, request("GET", "/whoami", Some("99"))).await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorResponse = read_json(unknown).await;
    assert!(body.error);
    assert!(body.message.contains("Unknown user '99'"));

    let known = send(&app, request("GET", "/whoami", Some(HR_MANAGER))).await;
    assert_eq!(known.status(), StatusCode::OK);
    let whoami: WhoAmIResponse = read_json(known).await;
    assert_eq!(whoami.user.role, "manager");
    assert_eq!(whoami.user.department, "Human Resources");
}

#[tokio::test]
async fn test_document_listing_respects_visibility_and_filters() {
    let (_, app) = create_seeded_app();

    let all: ListDocumentsResponse =
        read_json(send(&app, request("GET", "/documents", Some(ADMIN))).await).await;
    assert_eq!(all.total, 10);

    let employee: ListDocumentsResponse =
        read_json(send(&app, request("GET", "/documents", Some(HR_EMPLOYEE))).await).await;
    assert_eq!(employee.total, 6);

    let pending: ListDocumentsResponse = read_json(
        send(
            &app,
            request("GET", "/documents?status=pending&sort=date", Some(HR_EMPLOYEE)),
        )
        .await,
    )
    .await;
    assert_eq!(pending.total, 3);
    assert!(pending.documents.iter().all(|d| d.approval_status == "pending"));

    let bad = send(&app, request("GET", "/documents?status=archived", Some(ADMIN))).await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_approve_maps_errors_to_status_codes() {
    let (_, app) = create_seeded_app();

    let employee = send(&app, request("POST", "/documents/9/approve", Some(HR_EMPLOYEE))).await;
    assert_eq!(employee.status(), StatusCode::FORBIDDEN);

    let other_department =
        send(&app, request("POST", "/documents/2/approve", Some(HR_MANAGER))).await;
    assert_eq!(other_department.status(), StatusCode::FORBIDDEN);

    let approved = send(&app, request("POST", "/documents/9/approve", Some(HR_MANAGER))).await;
    assert_eq!(approved.status(), StatusCode::OK);
    let body: DocumentResponse = read_json(approved).await;
    assert_eq!(body.document.approval_status, "approved");
    assert_eq!(body.document.approved_by.as_deref(), Some(HR_MANAGER));

    let again = send(&app, request("POST", "/documents/9/approve", Some(ADMIN))).await;
    assert_eq!(again.status(), StatusCode::CONFLICT);

    let missing = send(&app, request("POST", "/documents/nope/approve", Some(ADMIN))).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reject_requires_feedback() {
    let (_, app) = create_seeded_app();

    let empty = send(
        &app,
        json_request(
            "POST",
            "/documents/7/reject",
            HR_MANAGER,
            &RejectDocumentRequest {
                feedback: String::new(),
            },
        ),
    )
    .await;
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

    let rejected = send(
        &app,
        json_request(
            "POST",
            "/documents/7/reject",
            HR_MANAGER,
            &RejectDocumentRequest {
                feedback: String::from("Missing the hybrid schedule section"),
            },
        ),
    )
    .await;
    assert_eq!(rejected.status(), StatusCode::OK);
    let body: DocumentResponse = read_json(rejected).await;
    assert_eq!(body.document.approval_status, "rejected");
}

#[tokio::test]
async fn test_broadcast_approval_reaches_live_stream() {
    let (app_state, app) = create_seeded_app();
    let mut rx = app_state.live.subscribe();

    let response = send(&app, request("POST", "/documents/8/approve", Some(HR_MANAGER))).await;
    assert_eq!(response.status(), StatusCode::OK);

    match rx.try_recv() {
        Ok(LiveEvent::Notification {
            event:
                NotificationEvent::BroadcastApproval {
                    document_id,
                    acting_user_id,
                    recipients,
                },
        }) => {
            assert_eq!(document_id.as_str(), "8");
            assert_eq!(acting_user_id, UserId::new(HR_MANAGER));
            let ids: Vec<&str> = recipients.iter().map(Recipient::email).collect();
            assert_eq!(
                ids,
                vec!["fms-admin@edaratgroup.com", "fms-em001@edaratgroup.com"]
            );
        }
        other => panic!("Expected a broadcast approval, got {other:?}"),
    }
}

#[tokio::test]
async fn test_upload_is_admin_only() {
    let (_, app) = create_seeded_app();
    let body = serde_json::json!({
        "title": "Travel Policy",
        "document_type": "Policy",
        "file_type": "pdf",
        "department": "Finance",
        "access_type": "public",
    });

    let manager = send(&app, json_request("POST", "/documents", HR_MANAGER, &body)).await;
    assert_eq!(manager.status(), StatusCode::FORBIDDEN);

    let admin = send(&app, json_request("POST", "/documents", ADMIN, &body)).await;
    assert_eq!(admin.status(), StatusCode::OK);
    let created: DocumentResponse = read_json(admin).await;
    assert!(created.document.id.starts_with("doc-"));
    assert_eq!(created.document.approval_status, "pending");
    assert_eq!(created.document.uploaded_by, ADMIN);
}

#[tokio::test]
async fn test_bulk_decision_reports_partial_success() {
    let (_, app) = create_seeded_app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/documents/bulk",
            HR_MANAGER,
            &BulkDecisionRequest {
                action: BulkAction::Approve,
                document_ids: Some(vec![
                    String::from("7"),
                    String::from("9"),
                    String::from("1"),
                ]),
                feedback: None,
            },
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: BulkDecisionResponse = read_json(response).await;
    assert_eq!(body.succeeded, vec![String::from("7"), String::from("9")]);
    assert_eq!(body.failed.len(), 1);
    assert_eq!(body.failed[0].document_id, "1");

    let employee = send(
        &app,
        json_request(
            "POST",
            "/documents/bulk",
            HR_EMPLOYEE,
            &BulkDecisionRequest {
                action: BulkAction::Approve,
                document_ids: None,
                feedback: None,
            },
        ),
    )
    .await;
    assert_eq!(employee.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_selection_routes() {
    let (_, app) = create_seeded_app();

    let selected = send(
        &app,
        json_request(
            "POST",
            "/selection",
            HR_MANAGER,
            &SelectionRequest {
                document_id: String::from("7"),
                selected: true,
            },
        ),
    )
    .await;
    assert_eq!(selected.status(), StatusCode::OK);

    let current: SelectionResponse =
        read_json(send(&app, request("GET", "/selection", Some(HR_MANAGER))).await).await;
    assert_eq!(current.document_ids, vec![String::from("7")]);

    let hidden = send(
        &app,
        json_request(
            "POST",
            "/selection",
            HR_MANAGER,
            &SelectionRequest {
                document_id: String::from("3"),
                selected: true,
            },
        ),
    )
    .await;
    assert_ne!(hidden.status(), StatusCode::OK);

    let cleared: SelectionResponse =
        read_json(send(&app, request("DELETE", "/selection", Some(HR_MANAGER))).await).await;
    assert!(cleared.document_ids.is_empty());
}

#[tokio::test]
async fn test_acceptance_routes() {
    let (_, app) = create_seeded_app();

    let before: ListDocumentsResponse = read_json(
        send(&app, request("GET", "/acceptances/pending", Some(HR_EMPLOYEE))).await,
    )
    .await;
    assert_eq!(before.total, 2);

    let accept = AcceptDocumentRequest {
        acceptance_type: String::from("acknowledged"),
    };
    let first = send(
        &app,
        json_request("POST", "/documents/1/accept", HR_EMPLOYEE, &accept),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = send(
        &app,
        json_request("POST", "/documents/1/accept", HR_EMPLOYEE, &accept),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let pending_document = send(
        &app,
        json_request("POST", "/documents/7/accept", HR_EMPLOYEE, &accept),
    )
    .await;
    assert_eq!(pending_document.status(), StatusCode::CONFLICT);

    let after: ListDocumentsResponse = read_json(
        send(&app, request("GET", "/acceptances/pending", Some(HR_EMPLOYEE))).await,
    )
    .await;
    assert_eq!(after.total, 1);
    assert_eq!(after.documents[0].id, "4");
}

#[tokio::test]
async fn test_history_records_views_and_downloads() {
    let (_, app) = create_seeded_app();

    let view = send(&app, request("GET", "/documents/1", Some(HR_EMPLOYEE))).await;
    assert_eq!(view.status(), StatusCode::OK);
    let info: DocumentInfo = read_json(view).await;
    assert!(info.capabilities.can_accept.is_allowed());

    let download = send(&app, request("POST", "/documents/1/download", Some(HR_MANAGER))).await;
    assert_eq!(download.status(), StatusCode::OK);

    let denied = send(&app, request("GET", "/documents/1/audit", Some(HR_EMPLOYEE))).await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let trail: AuditTrailResponse =
        read_json(send(&app, request("GET", "/documents/1/audit", Some(HR_MANAGER))).await).await;
    let actions: Vec<&str> = trail.events.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(actions, vec!["Upload", "View", "Download"]);
}

#[tokio::test]
async fn test_update_document_route() {
    let (_, app) = create_seeded_app();

    let response = send(
        &app,
        json_request(
            "PATCH",
            "/documents/9",
            HR_MANAGER,
            &UpdateDocumentRequest {
                title: Some(String::from("Onboarding Checklist")),
                ..UpdateDocumentRequest::default()
            },
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: DocumentResponse = read_json(response).await;
    assert_eq!(body.document.title, "Onboarding Checklist");

    let employee = send(
        &app,
        json_request(
            "PATCH",
            "/documents/9",
            HR_EMPLOYEE,
            &UpdateDocumentRequest::default(),
        ),
    )
    .await;
    assert_eq!(employee.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_approval_request_falls_back_to_default_address() {
    let (app_state, app) = create_seeded_app();
    let mut rx = app_state.live.subscribe();

    let response = send(
        &app,
        json_request(
            "POST",
            "/approval_requests",
            ADMIN,
            &ApprovalRequestRequest {
                document_ids: vec![String::from("2"), String::from("9")],
                is_individual: false,
            },
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: DispatchResponse = read_json(response).await;
    assert_eq!(body.dispatched, vec![String::from("2"), String::from("9")]);

    let mut recipients: Vec<String> = Vec::new();
    while let Ok(LiveEvent::Notification { event }) = rx.try_recv() {
        assert_eq!(event.kind(), "approval_requested");
        recipients.extend(event.recipients().iter().map(|r| r.email().to_string()));
    }
    assert_eq!(
        recipients,
        vec![
            DEFAULT_MANAGER_ADDRESS.to_string(),
            String::from("fms-hr@edaratgroup.com"),
        ]
    );
}

#[tokio::test]
async fn test_reminders_reach_department_manager() {
    let (app_state, app) = create_seeded_app();
    let mut rx = app_state.live.subscribe();

    let response = send(
        &app,
        json_request(
            "POST",
            "/reminders",
            HR_EMPLOYEE,
            &ReminderRequest {
                document_ids: vec![String::from("9"), String::from("1"), String::from("3")],
            },
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: DispatchResponse = read_json(response).await;
    assert_eq!(body.dispatched, vec![String::from("9")]);
    let failed: Vec<&str> = body.failed.iter().map(|f| f.document_id.as_str()).collect();
    assert_eq!(failed, vec!["1", "3"]);

    let Ok(LiveEvent::Notification { event }) = rx.try_recv() else {
        panic!("expected a reminder notification");
    };
    assert_eq!(event.kind(), "reminder_requested");
    assert_eq!(event.document_id().as_str(), "9");
    let recipients: Vec<&str> = event.recipients().iter().map(Recipient::email).collect();
    assert_eq!(recipients, vec!["fms-hr@edaratgroup.com"]);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_departments_list_and_admin_add() {
    let (_, app) = create_seeded_app();

    let listed: ListDepartmentsResponse =
        read_json(send(&app, request("GET", "/departments", Some(HR_EMPLOYEE))).await).await;
    let counts: Vec<(&str, usize)> = listed
        .departments
        .iter()
        .map(|d| (d.name.as_str(), d.document_count))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("Human Resources", 5),
            ("Information Technology", 0),
            ("Finance", 0),
            ("Operations", 1),
            ("Marketing", 0),
            ("Legal", 0),
        ]
    );

    let procurement: AddDepartmentRequest = AddDepartmentRequest {
        name: String::from("Procurement"),
        color: Some(String::from("#84CC16")),
    };
    let manager = send(
        &app,
        json_request("POST", "/departments", HR_MANAGER, &procurement),
    )
    .await;
    assert_eq!(manager.status(), StatusCode::FORBIDDEN);

    let added = send(&app, json_request("POST", "/departments", ADMIN, &procurement)).await;
    assert_eq!(added.status(), StatusCode::OK);
    let body: DepartmentResponse = read_json(added).await;
    assert_eq!(body.department.id, "7");
    assert_eq!(body.department.document_count, 0);

    let duplicate = send(&app, json_request("POST", "/departments", ADMIN, &procurement)).await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let after: ListDepartmentsResponse =
        read_json(send(&app, request("GET", "/departments", Some(ADMIN))).await).await;
    assert_eq!(after.departments.len(), 7);
    assert_eq!(after.departments[6].color, "#84CC16");
}

#[tokio::test]
async fn test_statistics_count_visible_documents() {
    let (_, app) = create_seeded_app();

    let admin: StatisticsResponse =
        read_json(send(&app, request("GET", "/statistics", Some(ADMIN))).await).await;
    assert_eq!(admin.total, 10);
    assert_eq!(admin.pending, 5);
    assert_eq!(admin.approved, 5);
    assert_eq!(admin.public, 4);
    assert_eq!(admin.departments, 5);
    assert_eq!(admin.recent_uploads, 10);
    assert_eq!(admin.my_department, 2);

    let employee: StatisticsResponse =
        read_json(send(&app, request("GET", "/statistics", Some(HR_EMPLOYEE))).await).await;
    assert_eq!(employee.total, 6);
    assert_eq!(employee.departments, 2);
    assert_eq!(employee.my_department, 5);
}
