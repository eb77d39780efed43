// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live notification streaming for connected clients.
//!
//! Every notification the engine dispatches is also pushed to websocket
//! clients on `/live`. Events are informational: they describe committed
//! changes, and clients re-read documents over HTTP for authoritative data.
//! Nothing sent by a client over the socket is executed.

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use doc_approval::{NotificationDispatcher, NotificationEvent, TracingDispatcher};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::AppState;

/// Maximum number of events to buffer in the broadcast channel.
/// If clients cannot keep up, older events will be dropped.
const EVENT_BUFFER_SIZE: usize = 100;

/// A message on the live stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// Server timestamp (RFC 3339).
        timestamp: String,
    },
    /// The engine dispatched a notification.
    Notification {
        /// The dispatched event.
        event: NotificationEvent,
    },
}

/// Fans live events out to every connected client.
#[derive(Debug, Clone)]
pub struct LiveEventBroadcaster {
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    /// Creates a new event broadcaster.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Broadcasts an event to all connected clients.
    ///
    /// If no clients are connected, the event is silently dropped.
    pub fn broadcast(&self, event: &LiveEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => debug!(?event, receivers = count, "Broadcast live event"),
            Err(_) => debug!(?event, "No receivers for live event"),
        }
    }

    /// Subscribes to events sent from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Notification dispatcher that logs each event and pushes it to the live
/// stream.
#[derive(Debug, Clone)]
pub struct BroadcastDispatcher {
    broadcaster: Arc<LiveEventBroadcaster>,
}

impl BroadcastDispatcher {
    #[must_use]
    pub const fn new(broadcaster: Arc<LiveEventBroadcaster>) -> Self {
        Self { broadcaster }
    }
}

impl NotificationDispatcher for BroadcastDispatcher {
    fn dispatch(&self, event: NotificationEvent) {
        TracingDispatcher.dispatch(event.clone());
        self.broadcaster.broadcast(&LiveEvent::Notification { event });
    }
}

/// Upgrades `/live` requests to a websocket carrying live events.
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(app_state): AxumState<AppState>,
) -> Response {
    let broadcaster: Arc<LiveEventBroadcaster> = app_state.live;
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

async fn send_event(socket: &mut WebSocket, event: &LiveEvent) -> bool {
    match serde_json::to_string(event) {
        Ok(json) => socket.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            error!(?e, "Failed to serialize live event");
            true
        }
    }
}

/// Confirms the connection, then forwards events until either side goes
/// away. Incoming text and binary frames are ignored.
async fn handle_socket(mut socket: WebSocket, broadcaster: Arc<LiveEventBroadcaster>) {
    let mut rx: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();
    info!("Client connected to live event stream");

    let connected: LiveEvent = LiveEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| String::from("unknown")),
    };
    if !send_event(&mut socket, &connected).await {
        warn!("Failed to send connection confirmation");
        return;
    }

    loop {
        tokio::select! {
            received = rx.recv() => match received {
                Ok(event) => {
                    if !send_event(&mut socket, &event).await {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live client lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(Message::Text(_) | Message::Binary(_))) => {
                    debug!("Ignoring message from live client");
                }
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => {}
                Some(Err(e)) => {
                    debug!(?e, "Live socket receive error");
                    break;
                }
            },
        }
    }

    info!("Client disconnected from live event stream");
}
