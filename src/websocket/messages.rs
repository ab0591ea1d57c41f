//! WebSocket Message Types
//!
//! Defines all message types for WebSocket communication between
//! dashboard clients and the server.

use serde::{Deserialize, Serialize};

use crate::api::dto::{FeatureDto, FeaturesResponse};
use crate::features::FeatureSet;
use crate::prediction::{PredictionStatus, StatusSnapshot};

/// Topic carrying feature input changes
pub const TOPIC_FEATURES: &str = "features";
/// Topic carrying prediction status changes
pub const TOPIC_PREDICTION: &str = "prediction";

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Subscribe to topics for change notifications
    Subscribe {
        /// Topics to subscribe to ("features", "prediction")
        topics: Vec<String>,
    },
    /// Unsubscribe from topics
    Unsubscribe {
        topics: Vec<String>,
    },
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Feature inputs changed
    Features {
        features: Vec<FeatureDto>,
    },
    /// Prediction status changed
    Prediction {
        submission: u64,
        status: PredictionStatus,
        updated_at: i64,
    },
    /// Subscription confirmed
    Subscribed {
        topics: Vec<String>,
    },
    /// Unsubscription confirmed
    Unsubscribed {
        topics: Vec<String>,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        message: String,
    },
    /// Connection established
    Connected {
        connection_id: String,
    },
}

impl ServerMessage {
    pub fn features(set: &FeatureSet) -> Self {
        ServerMessage::Features {
            features: FeaturesResponse::from(set).features,
        }
    }

    pub fn prediction(snapshot: &StatusSnapshot) -> Self {
        ServerMessage::Prediction {
            submission: snapshot.submission,
            status: snapshot.status.clone(),
            updated_at: snapshot.updated_at,
        }
    }
}

/// Internal event for broadcasting through the hub
#[derive(Debug, Clone)]
pub struct WsEvent {
    /// Topic this event belongs to
    pub topic: String,
    /// The message to send to subscribers
    pub message: ServerMessage,
}

impl WsEvent {
    pub fn features(set: &FeatureSet) -> Self {
        Self {
            topic: TOPIC_FEATURES.to_string(),
            message: ServerMessage::features(set),
        }
    }

    pub fn prediction(snapshot: &StatusSnapshot) -> Self {
        Self {
            topic: TOPIC_PREDICTION.to_string(),
            message: ServerMessage::prediction(snapshot),
        }
    }
}
