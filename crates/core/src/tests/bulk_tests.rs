// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    Fixture, HR, IT, admin, create_test_engine, create_test_upload, hr_employee, hr_manager,
    upload_pending,
};
use crate::{BulkAction, BulkResult, CoreError, NotificationEvent};
use doc_approval_domain::{ApprovalStatus, DocumentId, NewDocument};

#[test]
fn test_bulk_skips_terminal_documents() {
    let Fixture { engine, .. } = create_test_engine();
    let terminal: DocumentId = upload_pending(&engine, "T", HR);
    let pending: DocumentId = upload_pending(&engine, "P", HR);
    engine.approve(&terminal, &admin()).unwrap();

    let result: BulkResult = engine
        .bulk_apply(
            BulkAction::Approve,
            &[terminal.clone(), pending.clone()],
            &hr_manager(),
            None,
        )
        .unwrap();

    assert_eq!(result.succeeded, vec![pending.clone()]);
    assert_eq!(result.failed.len(), 1);
    assert_eq!(result.failed[0].document_id, terminal);
    assert!(matches!(
        result.failed[0].error,
        CoreError::InvalidTransition { .. }
    ));
    assert!(!result.is_complete());
    assert_eq!(
        engine.get_document(&pending, &admin()).unwrap().approval_status,
        ApprovalStatus::Approved
    );
}

#[test]
fn test_bulk_collects_each_failure_kind() {
    let Fixture { engine, .. } = create_test_engine();
    let hr_doc: DocumentId = upload_pending(&engine, "HR1", HR);
    let it_doc: DocumentId = upload_pending(&engine, "IT1", IT);
    let ghost: DocumentId = DocumentId::new("ghost");

    let result: BulkResult = engine
        .bulk_apply(
            BulkAction::Reject,
            &[hr_doc.clone(), it_doc.clone(), ghost.clone()],
            &hr_manager(),
            Some("Needs review"),
        )
        .unwrap();

    assert_eq!(result.succeeded, vec![hr_doc]);
    let failures: Vec<(&DocumentId, &CoreError)> = result
        .failed
        .iter()
        .map(|f| (&f.document_id, &f.error))
        .collect();
    assert!(matches!(failures[0], (id, CoreError::Unauthorized { .. }) if *id == it_doc));
    assert!(matches!(failures[1], (id, CoreError::NotFound(_)) if *id == ghost));
}

#[test]
fn test_bulk_reject_without_feedback_touches_nothing() {
    let Fixture { engine, .. } = create_test_engine();
    let id: DocumentId = upload_pending(&engine, "D1", HR);
    engine.select(&admin(), &id).unwrap();

    for feedback in [None, Some(""), Some("   ")] {
        let result: Result<BulkResult, CoreError> = engine.bulk_apply(
            BulkAction::Reject,
            std::slice::from_ref(&id),
            &admin(),
            feedback,
        );
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    assert_eq!(
        engine.get_document(&id, &admin()).unwrap().approval_status,
        ApprovalStatus::Pending
    );
    assert_eq!(engine.selection(&admin().id), vec![id]);
}

#[test]
fn test_bulk_clears_succeeded_from_selection() {
    let Fixture { engine, .. } = create_test_engine();
    let ok: DocumentId = upload_pending(&engine, "OK", HR);
    let other: DocumentId = upload_pending(&engine, "OTHER", IT);
    engine.select(&hr_manager(), &ok).unwrap();
    engine.select(&hr_manager(), &other).unwrap();

    let result: BulkResult = engine
        .bulk_apply_selection(BulkAction::Approve, &hr_manager(), None)
        .unwrap();

    assert_eq!(result.succeeded, vec![ok.clone()]);
    let selection: Vec<DocumentId> = engine.selection(&hr_manager().id);
    assert!(result.succeeded.iter().all(|id| !selection.contains(id)));
    assert_eq!(selection, vec![other]);
}

#[test]
fn test_bulk_deduplicates_ids() {
    let Fixture { engine, .. } = create_test_engine();
    let id: DocumentId = upload_pending(&engine, "D1", HR);

    let result: BulkResult = engine
        .bulk_apply(
            BulkAction::Approve,
            &[id.clone(), id.clone()],
            &admin(),
            None,
        )
        .unwrap();

    assert_eq!(result.succeeded, vec![id]);
    assert!(result.failed.is_empty());
}

#[test]
fn test_bulk_by_employee_fails_every_item() {
    let Fixture { engine, .. } = create_test_engine();
    let d1: DocumentId = upload_pending(&engine, "D1", HR);
    let d2: DocumentId = upload_pending(&engine, "D2", HR);

    let result: BulkResult = engine
        .bulk_apply(BulkAction::Approve, &[d1, d2], &hr_employee(), None)
        .unwrap();

    assert!(result.succeeded.is_empty());
    assert_eq!(result.failed.len(), 2);
}

#[test]
fn test_bulk_approve_broadcasts_flagged_documents_only() {
    let Fixture { engine, dispatcher } = create_test_engine();
    let mut flagged: NewDocument = create_test_upload("FLAG", HR);
    flagged.notify_all_after_approval = true;
    engine.upload(flagged, &admin()).unwrap();
    let plain: DocumentId = upload_pending(&engine, "PLAIN", HR);

    engine
        .bulk_apply(
            BulkAction::Approve,
            &[DocumentId::new("FLAG"), plain],
            &admin(),
            None,
        )
        .unwrap();

    let events: Vec<NotificationEvent> = dispatcher.events();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        NotificationEvent::BroadcastApproval { document_id, .. } if document_id.as_str() == "FLAG"
    ));
}
