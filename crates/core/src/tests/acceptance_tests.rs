// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    Fixture, HR, IT, admin, create_test_engine, create_test_upload, hr_employee, hr_manager,
};
use crate::{ApprovalEngine, CoreError};
use doc_approval_domain::{
    AcceptanceType, AccessType, Document, DocumentAcceptance, DocumentId, NewDocument,
};

fn upload_requiring_acceptance(engine: &ApprovalEngine, id: &str, department: &str) -> DocumentId {
    let mut upload: NewDocument = create_test_upload(id, department);
    upload.requires_acceptance = true;
    engine.upload(upload, &admin()).unwrap().id
}

#[test]
fn test_accept_approved_document() {
    let Fixture { engine, .. } = create_test_engine();
    let id: DocumentId = upload_requiring_acceptance(&engine, "D1", HR);
    engine.approve(&id, &hr_manager()).unwrap();

    let acceptance: DocumentAcceptance = engine
        .accept(&id, &hr_employee(), AcceptanceType::Signed)
        .unwrap();

    assert_eq!(acceptance.user_id, hr_employee().id);
    assert_eq!(acceptance.acceptance_type, AcceptanceType::Signed);
    assert_eq!(engine.acceptances_for(&id, &admin()).unwrap(), vec![acceptance]);
    let trail = engine.audit_trail(&id, &admin()).unwrap();
    assert_eq!(trail.last().unwrap().action.name, "Accept");
}

#[test]
fn test_accept_twice_is_rejected() {
    let Fixture { engine, .. } = create_test_engine();
    let id: DocumentId = upload_requiring_acceptance(&engine, "D1", HR);
    engine.approve(&id, &hr_manager()).unwrap();
    engine
        .accept(&id, &hr_employee(), AcceptanceType::Acknowledged)
        .unwrap();

    let result: Result<DocumentAcceptance, CoreError> =
        engine.accept(&id, &hr_employee(), AcceptanceType::Signed);

    assert!(matches!(result, Err(CoreError::DuplicateAcceptance { .. })));
    assert_eq!(engine.acceptances_for(&id, &admin()).unwrap().len(), 1);
}

#[test]
fn test_accept_requires_approval_and_flag() {
    let Fixture { engine, .. } = create_test_engine();
    let pending: DocumentId = upload_requiring_acceptance(&engine, "P", HR);
    let mut plain: NewDocument = create_test_upload("N", HR);
    plain.approval_required = false;
    engine.upload(plain, &admin()).unwrap();

    assert!(matches!(
        engine.accept(&pending, &hr_employee(), AcceptanceType::Signed),
        Err(CoreError::AcceptanceNotAllowed { .. })
    ));
    assert!(matches!(
        engine.accept(&DocumentId::new("N"), &hr_employee(), AcceptanceType::Signed),
        Err(CoreError::AcceptanceNotAllowed { .. })
    ));
}

#[test]
fn test_pending_acceptances_excludes_accepted_and_hidden() {
    let Fixture { engine, .. } = create_test_engine();
    let first: DocumentId = upload_requiring_acceptance(&engine, "A", HR);
    let second: DocumentId = upload_requiring_acceptance(&engine, "B", HR);
    let mut hidden: NewDocument = create_test_upload("C", IT);
    hidden.requires_acceptance = true;
    hidden.access_type = AccessType::Department;
    hidden.approval_required = false;
    engine.upload(hidden, &admin()).unwrap();
    upload_requiring_acceptance(&engine, "D", HR);
    engine.approve(&first, &hr_manager()).unwrap();
    engine.approve(&second, &hr_manager()).unwrap();

    engine
        .accept(&first, &hr_employee(), AcceptanceType::Acknowledged)
        .unwrap();
    let outstanding: Vec<Document> = engine.pending_acceptances(&hr_employee());

    assert_eq!(outstanding.len(), 1);
    assert_eq!(outstanding[0].id, second);
}
