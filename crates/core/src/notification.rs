// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::directory::Recipient;
use doc_approval_domain::{DocumentId, UserId};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;

/// An event handed to the notification dispatcher.
///
/// Events are emitted only after the change they describe is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationEvent {
    /// A document flagged for broadcast was approved.
    BroadcastApproval {
        document_id: DocumentId,
        acting_user_id: UserId,
        recipients: Vec<Recipient>,
    },
    /// A document was rejected with feedback.
    FeedbackRecorded {
        document_id: DocumentId,
        acting_user_id: UserId,
        feedback: String,
        recipients: Vec<Recipient>,
    },
    /// A department manager was asked to review a pending document.
    ApprovalRequested {
        document_id: DocumentId,
        acting_user_id: UserId,
        is_individual: bool,
        recipients: Vec<Recipient>,
    },
    /// A department manager was reminded about a pending document.
    ReminderRequested {
        document_id: DocumentId,
        acting_user_id: UserId,
        recipients: Vec<Recipient>,
    },
}

impl NotificationEvent {
    /// The event name as it appears on the wire.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::BroadcastApproval { .. } => "broadcast_approval",
            Self::FeedbackRecorded { .. } => "feedback_recorded",
            Self::ApprovalRequested { .. } => "approval_requested",
            Self::ReminderRequested { .. } => "reminder_requested",
        }
    }

    #[must_use]
    pub const fn document_id(&self) -> &DocumentId {
        match self {
            Self::BroadcastApproval { document_id, .. }
            | Self::FeedbackRecorded { document_id, .. }
            | Self::ApprovalRequested { document_id, .. }
            | Self::ReminderRequested { document_id, .. } => document_id,
        }
    }

    #[must_use]
    pub const fn acting_user_id(&self) -> &UserId {
        match self {
            Self::BroadcastApproval { acting_user_id, .. }
            | Self::FeedbackRecorded { acting_user_id, .. }
            | Self::ApprovalRequested { acting_user_id, .. }
            | Self::ReminderRequested { acting_user_id, .. } => acting_user_id,
        }
    }

    #[must_use]
    pub fn recipients(&self) -> &[Recipient] {
        match self {
            Self::BroadcastApproval { recipients, .. }
            | Self::FeedbackRecorded { recipients, .. }
            | Self::ApprovalRequested { recipients, .. }
            | Self::ReminderRequested { recipients, .. } => recipients,
        }
    }
}

/// Receives notification events.
///
/// Dispatch is fire-and-forget: implementations report nothing back and a
/// failed delivery never affects the change that produced the event.
pub trait NotificationDispatcher: Send + Sync {
    /// Hands an event to the delivery mechanism.
    fn dispatch(&self, event: NotificationEvent);
}

/// Logs every event and delivers nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDispatcher;

impl NotificationDispatcher for TracingDispatcher {
    fn dispatch(&self, event: NotificationEvent) {
        info!(
            kind = event.kind(),
            document_id = %event.document_id(),
            actor = %event.acting_user_id(),
            recipients = event.recipients().len(),
            "Notification dispatched"
        );
    }
}

/// Keeps every event in memory, in dispatch order.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    events: Mutex<Vec<NotificationEvent>>,
}

impl RecordingDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every event recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<NotificationEvent> {
        self.events.lock().clone()
    }

    /// Returns and forgets every event recorded so far.
    pub fn take(&self) -> Vec<NotificationEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl NotificationDispatcher for RecordingDispatcher {
    fn dispatch(&self, event: NotificationEvent) {
        self.events.lock().push(event);
    }
}
