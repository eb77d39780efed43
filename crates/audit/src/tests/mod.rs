// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use doc_approval_domain::DocumentId;
use time::macros::datetime;

pub fn create_test_event(document_id: &str, action_name: &str) -> AuditEvent {
    AuditEvent::new(
        Actor::new(String::from("2"), String::from("manager")),
        Cause::new(String::from("req-456"), String::from("User request")),
        Action::new(action_name.to_string(), None),
        StateSnapshot::new(String::from("before-state")),
        StateSnapshot::new(String::from("after-state")),
        DocumentId::new(document_id),
        datetime!(2024-01-20 12:00 UTC),
    )
}
