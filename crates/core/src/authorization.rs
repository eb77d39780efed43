// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role checks for document actions.
//!
//! Every check matches the role exhaustively so that adding a role forces
//! each site to decide what it may do.

use crate::error::CoreError;
use doc_approval_domain::{Document, Role, User, can_view};

fn unauthorized(actor: &User, document: &Document, action: &str, reason: &str) -> CoreError {
    CoreError::Unauthorized {
        action: action.to_string(),
        user_id: actor.id.clone(),
        role: actor.role,
        document_id: document.id.clone(),
        reason: reason.to_string(),
    }
}

/// Checks whether `actor` may approve or reject `document`.
///
/// Admins may decide any document. Managers may decide documents of their
/// own department only. Employees may never decide.
///
/// # Errors
///
/// Returns `CoreError::Unauthorized` if the check fails.
pub fn authorize_decision(actor: &User, document: &Document, action: &str) -> Result<(), CoreError> {
    match actor.role {
        Role::Admin => Ok(()),
        Role::Manager if actor.department == document.department => Ok(()),
        Role::Manager => Err(unauthorized(
            actor,
            document,
            action,
            "managers may only act on documents of their own department",
        )),
        Role::Employee => Err(unauthorized(
            actor,
            document,
            action,
            "employees may not approve or reject documents",
        )),
    }
}

/// Checks whether `actor` may edit the descriptive fields of `document`.
///
/// # Errors
///
/// Returns `CoreError::Unauthorized` if the check fails.
pub fn authorize_update(actor: &User, document: &Document) -> Result<(), CoreError> {
    match actor.role {
        Role::Admin => Ok(()),
        Role::Manager if actor.department == document.department => Ok(()),
        Role::Manager => Err(unauthorized(
            actor,
            document,
            "update",
            "managers may only edit documents of their own department",
        )),
        Role::Employee => Err(unauthorized(
            actor,
            document,
            "update",
            "employees may not edit documents",
        )),
    }
}

/// Checks whether `actor` may see `document` at all.
///
/// # Errors
///
/// Returns `CoreError::Unauthorized` if the document is hidden from the actor.
pub fn authorize_view(actor: &User, document: &Document) -> Result<(), CoreError> {
    if can_view(actor, document) {
        Ok(())
    } else {
        Err(unauthorized(
            actor,
            document,
            "view",
            "document is not visible to this user",
        ))
    }
}

/// Checks whether `actor` may upload `document`.
///
/// Only administrators upload documents.
///
/// # Errors
///
/// Returns `CoreError::Unauthorized` if the actor is not an administrator.
pub fn authorize_upload(actor: &User, document: &Document) -> Result<(), CoreError> {
    match actor.role {
        Role::Admin => Ok(()),
        Role::Manager | Role::Employee => Err(unauthorized(
            actor,
            document,
            "upload",
            "only administrators may upload documents",
        )),
    }
}

/// Checks whether `actor` may read the audit history of `document`.
///
/// # Errors
///
/// Returns `CoreError::Unauthorized` for employees and for documents the
/// actor cannot see.
pub fn authorize_history(actor: &User, document: &Document) -> Result<(), CoreError> {
    match actor.role {
        Role::Admin | Role::Manager => authorize_view(actor, document),
        Role::Employee => Err(unauthorized(
            actor,
            document,
            "view history of",
            "employees may not view document history",
        )),
    }
}

/// Checks whether `actor` may register departments.
///
/// Only administrators manage departments.
///
/// # Errors
///
/// Returns `CoreError::NotPermitted` if the actor is not an administrator.
pub fn authorize_manage_departments(actor: &User) -> Result<(), CoreError> {
    match actor.role {
        Role::Admin => Ok(()),
        Role::Manager | Role::Employee => Err(CoreError::NotPermitted {
            action: String::from("add department"),
            user_id: actor.id.clone(),
            role: actor.role,
            reason: String::from("only administrators may manage departments"),
        }),
    }
}
