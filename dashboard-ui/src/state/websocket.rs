//! WebSocket Client
//!
//! Live connection to the dashboard API. The server greets each connection
//! with the current features and prediction, then pushes changes.

use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use super::global::{DashboardState, Feature, PredictionSnapshot, PredictionState};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;

/// WebSocket message types from server
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    Connected {
        connection_id: String,
    },
    Features {
        features: Vec<Feature>,
    },
    Prediction {
        submission: u64,
        status: PredictionState,
        updated_at: i64,
    },
    Subscribed {
        topics: Vec<String>,
    },
    Unsubscribed {
        topics: Vec<String>,
    },
    Pong,
    Error {
        message: String,
    },
}

/// WebSocket client message types
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Subscribe { topics: Vec<String> },
    Ping,
}

/// WebSocket client for live updates
#[derive(Clone)]
pub struct WebSocketClient {
    ws: Rc<RefCell<Option<WebSocket>>>,
    url: String,
    reconnect_attempts: Rc<RefCell<u32>>,
}

impl WebSocketClient {
    pub fn new(url: &str) -> Self {
        Self {
            ws: Rc::new(RefCell::new(None)),
            url: url.to_string(),
            reconnect_attempts: Rc::new(RefCell::new(0)),
        }
    }

    /// Connect to the WebSocket server
    pub fn connect(&self, state: DashboardState) {
        match WebSocket::new(&self.url) {
            Ok(ws) => {
                self.setup_handlers(&ws, state);
                *self.ws.borrow_mut() = Some(ws);
            }
            Err(e) => {
                web_sys::console::error_1(&format!("WebSocket connection failed: {:?}", e).into());
                self.schedule_reconnect(state);
            }
        }
    }

    fn setup_handlers(&self, ws: &WebSocket, state: DashboardState) {
        // On open: reset backoff and subscribe to both topics
        let client = self.clone();
        let on_open = Closure::wrap(Box::new(move |_: JsValue| {
            web_sys::console::log_1(&"WebSocket connected".into());
            state.ws_connected.set(true);
            *client.reconnect_attempts.borrow_mut() = 0;

            let subscribe = ClientMessage::Subscribe {
                topics: vec!["features".to_string(), "prediction".to_string()],
            };
            if let Err(e) = client.send(&subscribe) {
                web_sys::console::error_1(&format!("Subscribe failed: {}", e).into());
            }
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        on_open.forget();

        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            if let Ok(text) = event.data().dyn_into::<js_sys::JsString>() {
                let text: String = text.into();
                handle_message(&text, &state);
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        on_message.forget();

        let client = self.clone();
        let on_close = Closure::wrap(Box::new(move |event: CloseEvent| {
            web_sys::console::log_1(
                &format!("WebSocket closed: code={}, reason={}", event.code(), event.reason()).into(),
            );
            state.ws_connected.set(false);
            client.schedule_reconnect(state);
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        on_close.forget();

        let on_error = Closure::wrap(Box::new(move |e: JsValue| {
            web_sys::console::error_1(&format!("WebSocket error: {:?}", e).into());
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();
    }

    /// Schedule a reconnect attempt with exponential backoff
    fn schedule_reconnect(&self, state: DashboardState) {
        let attempts = *self.reconnect_attempts.borrow();
        if attempts >= MAX_RECONNECT_ATTEMPTS {
            web_sys::console::error_1(&"Max reconnect attempts reached".into());
            return;
        }

        let delay = reconnect_delay_ms(attempts);
        *self.reconnect_attempts.borrow_mut() = attempts + 1;

        let client = self.clone();
        gloo_timers::callback::Timeout::new(delay, move || {
            web_sys::console::log_1(&format!("Attempting reconnect (attempt {})", attempts + 1).into());
            client.connect(state);
        })
        .forget();
    }

    /// Send a message to the server
    pub fn send(&self, message: &ClientMessage) -> Result<(), String> {
        let ws_guard = self.ws.borrow();
        let ws = ws_guard.as_ref().ok_or("WebSocket not connected")?;

        let json = serde_json::to_string(message).map_err(|e| e.to_string())?;
        ws.send_with_str(&json).map_err(|e| format!("{:?}", e))
    }
}

fn reconnect_delay_ms(attempts: u32) -> u32 {
    (2_u32.pow(attempts) * 1000).min(30000)
}

/// Handle incoming WebSocket message
fn handle_message(text: &str, state: &DashboardState) {
    match serde_json::from_str::<WsMessage>(text) {
        Ok(WsMessage::Connected { connection_id }) => {
            web_sys::console::log_1(&format!("Connected with ID: {}", connection_id).into());
        }
        Ok(WsMessage::Features { features }) => {
            state.features.set(features);
        }
        Ok(WsMessage::Prediction {
            submission,
            status,
            updated_at,
        }) => {
            state.apply_prediction(PredictionSnapshot {
                submission,
                state: status,
                updated_at,
            });
        }
        Ok(WsMessage::Subscribed { topics }) => {
            web_sys::console::log_1(&format!("Subscribed to: {:?}", topics).into());
        }
        Ok(WsMessage::Unsubscribed { topics }) => {
            web_sys::console::log_1(&format!("Unsubscribed from: {:?}", topics).into());
        }
        Ok(WsMessage::Pong) => {}
        Ok(WsMessage::Error { message }) => {
            web_sys::console::error_1(&format!("Server error: {}", message).into());
            state.show_error(&message);
        }
        Err(e) => {
            web_sys::console::error_1(&format!("Failed to parse WebSocket message: {}", e).into());
        }
    }
}

/// Open the live connection (call from app root)
pub fn init_websocket(state: DashboardState, api_base: &str) {
    // api_base already contains /api/v1
    let ws_url = api_base
        .replacen("http://", "ws://", 1)
        .replacen("https://", "wss://", 1);
    WebSocketClient::new(&format!("{}/ws", ws_url)).connect(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::global::NumberStyle;

    #[test]
    fn test_prediction_message_shape() {
        let text = r#"{"type":"prediction","submission":2,"status":{"state":"success","prediction":42},"updated_at":5}"#;
        match serde_json::from_str::<WsMessage>(text).unwrap() {
            WsMessage::Prediction { submission, status, .. } => {
                assert_eq!(submission, 2);
                assert_eq!(
                    status,
                    PredictionState::Success {
                        prediction: serde_json::json!(42)
                    }
                );
            }
            other => panic!("Expected Prediction, got {:?}", other),
        }
    }

    #[test]
    fn test_features_message_shape() {
        let text = r#"{"type":"features","features":[{"index":0,"name":"Feature 1 (Age)","short_label":"Feature 1","value":14.0,"default_value":14.0,"style":"decimal"}]}"#;
        match serde_json::from_str::<WsMessage>(text).unwrap() {
            WsMessage::Features { features } => {
                assert_eq!(features.len(), 1);
                assert_eq!(features[0].short_label, "Feature 1");
                assert_eq!(features[0].style, NumberStyle::Decimal);
            }
            other => panic!("Expected Features, got {:?}", other),
        }
    }

    #[test]
    fn test_subscribe_serializes() {
        let json = serde_json::to_string(&ClientMessage::Subscribe {
            topics: vec!["features".to_string()],
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"subscribe","topics":["features"]}"#);
    }

    #[test]
    fn test_reconnect_backoff() {
        assert_eq!(reconnect_delay_ms(0), 1000);
        assert_eq!(reconnect_delay_ms(3), 8000);
        assert_eq!(reconnect_delay_ms(10), 30000);
    }
}
