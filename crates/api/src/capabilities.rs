// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what a user is permitted to do without leaking
//! domain internals. They are advisory only and do not replace the checks
//! the engine makes.

use crate::request_response::{Capability, DocumentCapabilities, GlobalCapabilities};
use doc_approval::{authorize_decision, authorize_history, authorize_update};
use doc_approval_domain::{ApprovalStatus, Document, Role, User};

/// Computes global capabilities for a user.
#[must_use]
pub const fn compute_global_capabilities(user: &User) -> GlobalCapabilities {
    match user.role {
        Role::Admin => GlobalCapabilities {
            can_upload: Capability::Allowed,
            can_bulk_decide: Capability::Allowed,
            can_view_history: Capability::Allowed,
            can_manage_departments: Capability::Allowed,
        },
        Role::Manager => GlobalCapabilities {
            can_upload: Capability::Denied,
            can_bulk_decide: Capability::Allowed,
            can_view_history: Capability::Allowed,
            can_manage_departments: Capability::Denied,
        },
        Role::Employee => GlobalCapabilities {
            can_upload: Capability::Denied,
            can_bulk_decide: Capability::Denied,
            can_view_history: Capability::Denied,
            can_manage_departments: Capability::Denied,
        },
    }
}

/// Computes what a user may do with one document.
///
/// The caller must already know the document is visible to the user.
///
/// # Arguments
///
/// * `user` - The calling user
/// * `document` - The document being evaluated
/// * `has_accepted` - Whether the user already accepted this document
#[must_use]
pub fn compute_document_capabilities(
    user: &User,
    document: &Document,
    has_accepted: bool,
) -> DocumentCapabilities {
    let pending: bool = document.is_pending();
    let may_decide: bool = pending && authorize_decision(user, document, "approve").is_ok();

    DocumentCapabilities {
        can_approve: Capability::from_bool(may_decide),
        can_reject: Capability::from_bool(may_decide),
        can_edit: Capability::from_bool(authorize_update(user, document).is_ok()),
        can_accept: Capability::from_bool(
            document.requires_acceptance
                && document.approval_status == ApprovalStatus::Approved
                && !has_accepted,
        ),
        can_request_approval: Capability::from_bool(pending),
        can_view_history: Capability::from_bool(authorize_history(user, document).is_ok()),
    }
}
