//! WebSocket Change Notifications
//!
//! Pushes session changes to dashboard clients so they redraw without
//! polling.
//!
//! ## Architecture
//!
//! - **ConnectionHub**: Manages all active connections and subscriptions
//! - **Handler**: Handles WebSocket upgrade and message processing
//! - **Relay**: Turns session `watch` changes into hub broadcasts
//! - **Messages**: Defines client and server message formats
//!
//! ## Topics
//!
//! - `features` - Feature inputs changed (full list)
//! - `prediction` - Prediction status changed
//!
//! On connect the server sends `connected`, then the current `features` and
//! `prediction`, regardless of subscriptions.
//!
//! ## Example
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:8090/api/v1/ws');
//!
//! ws.onopen = () => {
//!   ws.send(JSON.stringify({type: 'subscribe', topics: ['features', 'prediction']}));
//! };
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   console.log('Received:', msg);
//! };
//! ```

mod handler;
mod hub;
mod messages;
mod relay;

pub use handler::websocket_handler;
pub use hub::{ConnectionHub, ConnectionId, HubConfig, HubError};
pub use messages::{ClientMessage, ServerMessage, WsEvent, TOPIC_FEATURES, TOPIC_PREDICTION};
pub use relay::spawn_session_relay;
