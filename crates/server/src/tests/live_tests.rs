// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use doc_approval::{NotificationDispatcher, NotificationEvent, Recipient};
use doc_approval_domain::{DocumentId, UserId};
use std::sync::Arc;

use crate::live::{BroadcastDispatcher, LiveEvent, LiveEventBroadcaster};

fn create_reminder() -> NotificationEvent {
    NotificationEvent::ReminderRequested {
        document_id: DocumentId::new("9"),
        acting_user_id: UserId::new("1"),
        recipients: vec![Recipient::Address {
            email: String::from("manager@edaratgroup.com"),
        }],
    }
}

#[test]
fn test_broadcast_no_receivers() {
    let broadcaster: LiveEventBroadcaster = LiveEventBroadcaster::new();
    broadcaster.broadcast(&LiveEvent::Connected {
        timestamp: String::from("2026-01-01T00:00:00Z"),
    });
}

#[test]
fn test_multiple_receivers() {
    let broadcaster: LiveEventBroadcaster = LiveEventBroadcaster::new();
    let mut rx1 = broadcaster.subscribe();
    let mut rx2 = broadcaster.subscribe();

    broadcaster.broadcast(&LiveEvent::Notification {
        event: create_reminder(),
    });

    assert!(matches!(rx1.try_recv(), Ok(LiveEvent::Notification { .. })));
    assert!(matches!(rx2.try_recv(), Ok(LiveEvent::Notification { .. })));
}

#[test]
fn test_dispatcher_forwards_to_subscribers() {
    let broadcaster: Arc<LiveEventBroadcaster> = Arc::new(LiveEventBroadcaster::new());
    let mut rx = broadcaster.subscribe();
    let dispatcher: BroadcastDispatcher = BroadcastDispatcher::new(Arc::clone(&broadcaster));

    dispatcher.dispatch(create_reminder());

    assert_eq!(
        rx.try_recv().unwrap(),
        LiveEvent::Notification {
            event: create_reminder()
        }
    );
}

#[test]
fn test_event_wire_format_nests_notification() {
    let json: serde_json::Value = serde_json::to_value(LiveEvent::Notification {
        event: create_reminder(),
    })
    .unwrap();

    assert_eq!(json["type"], "notification");
    assert_eq!(json["event"]["type"], "reminder_requested");
    assert_eq!(json["event"]["document_id"], "9");
    assert_eq!(json["event"]["recipients"][0]["kind"], "address");
}
