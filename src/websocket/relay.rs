//! Session Relay
//!
//! Watches a session's feature and status channels and broadcasts each change
//! to the hub's subscribers.

use std::sync::Arc;
use tokio::task::JoinHandle;

use super::hub::ConnectionHub;
use super::messages::WsEvent;
use crate::session::Session;

/// Spawn a task that relays session changes to WebSocket subscribers
///
/// The task ends when the session is dropped; abort the handle to stop it
/// earlier.
pub fn spawn_session_relay(session: &Session, hub: Arc<ConnectionHub>) -> JoinHandle<()> {
    let mut features_rx = session.subscribe_features();
    let mut status_rx = session.subscribe_status();

    tokio::spawn(async move {
        loop {
            let event = tokio::select! {
                changed = features_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let event = WsEvent::features(&features_rx.borrow_and_update());
                    event
                }
                changed = status_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let event = WsEvent::prediction(&status_rx.borrow_and_update());
                    event
                }
            };

            let delivered = hub.broadcast(&event).await;
            tracing::trace!(topic = %event.topic, delivered, "Relayed session change");
        }

        tracing::debug!("Session relay stopped");
    })
}
