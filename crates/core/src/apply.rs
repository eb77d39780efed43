// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::authorization::authorize_decision;
use crate::command::Command;
use crate::error::CoreError;
use crate::state::{Effect, TransitionResult};
use doc_approval_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use doc_approval_domain::{ApprovalStatus, Document, User, validate_feedback};
use time::OffsetDateTime;

/// Applies an approval decision to a document, producing the new document,
/// an audit event and the effects to run after commit.
///
/// This function is pure: it never touches the store or any dispatcher.
/// Checks run in a fixed order so that the reported reason is stable:
/// authorization, then input validation, then the transition guard.
///
/// # Arguments
///
/// * `document` - The current document (immutable)
/// * `command` - The decision to apply
/// * `actor` - The user making the decision
/// * `cause` - The cause or reason for this action
/// * `now` - The decision timestamp
///
/// # Errors
///
/// Returns an error if:
/// - The actor's role or department does not permit the decision
/// - A rejection carries empty feedback
/// - The document is not pending
pub fn apply(
    document: &Document,
    command: Command,
    actor: &User,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let action_name: &str = command.action_name();
    authorize_decision(actor, document, action_name)?;

    if let Command::Reject { feedback } = &command {
        validate_feedback(feedback)?;
    }

    let target: ApprovalStatus = command.target_status();
    if !document.approval_status.can_transition_to(target) {
        return Err(CoreError::InvalidTransition {
            document_id: document.id.clone(),
            from: document.approval_status,
            action: action_name.to_string(),
        });
    }

    let mut next: Document = document.clone();
    next.approval_status = target;
    next.approved_by = Some(actor.id.clone());
    next.approved_at = Some(now);
    next.last_modified = now;

    let (action, effects): (Action, Vec<Effect>) = match command {
        Command::Approve => {
            let effects: Vec<Effect> = if document.notify_all_after_approval {
                vec![Effect::BroadcastApproval]
            } else {
                Vec::new()
            };
            (
                Action::new(
                    String::from("Approve"),
                    Some(format!("Approved by {}", actor.name)),
                ),
                effects,
            )
        }
        Command::Reject { feedback } => {
            let feedback: String = feedback.trim().to_string();
            (
                Action::new(
                    String::from("Reject"),
                    Some(format!("Rejected by {}: {feedback}", actor.name)),
                ),
                vec![Effect::RecordFeedback { feedback }],
            )
        }
    };

    let audit_event: AuditEvent = AuditEvent::new(
        Actor::from_user(actor),
        cause,
        action,
        StateSnapshot::new(document.summary()),
        StateSnapshot::new(next.summary()),
        next.id.clone(),
        now,
    );

    Ok(TransitionResult {
        document: next,
        audit_event,
        effects,
    })
}
