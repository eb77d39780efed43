// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document history: who did what to which document, and when.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod log;

#[cfg(test)]
mod tests;

use doc_approval_domain::{DocumentId, User};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub use log::AuditLog;

/// Who acted: a user id plus the role they acted under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    /// `admin`, `manager` or `employee`.
    pub actor_type: String,
}

impl Actor {
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// The actor for `user` acting under their current role.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self::new(user.id.to_string(), user.role.as_str().to_string())
    }
}

/// Why an action happened. The engine numbers causes per request
/// (`req-1`, `req-2`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    pub id: String,
    pub description: String,
}

impl Cause {
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// What happened: `Upload`, `Approve`, `Reject`, `Accept`, `View`,
/// `Download` or `Update`, with optional free-text detail such as the
/// rejection feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub details: Option<String>,
}

impl Action {
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// Document summary taken on one side of an action, e.g.
/// `document=7,status=pending,approved_by=-`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub data: String,
}

impl StateSnapshot {
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// One entry in a document's history.
///
/// Decisions, uploads, edits and acceptances record the document summary
/// before and after. Views and downloads record the same summary on both
/// sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Assigned by [`AuditLog::record`]; `None` before that.
    pub event_id: Option<u64>,
    pub actor: Actor,
    pub cause: Cause,
    pub action: Action,
    pub before: StateSnapshot,
    pub after: StateSnapshot,
    pub document_id: DocumentId,
    pub occurred_at: OffsetDateTime,
}

impl AuditEvent {
    /// Builds an unrecorded event.
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        document_id: DocumentId,
        occurred_at: OffsetDateTime,
    ) -> Self {
        Self {
            event_id: None,
            actor,
            cause,
            action,
            before,
            after,
            document_id,
            occurred_at,
        }
    }
}
