//! Prediction Status
//!
//! Lifecycle of a single submit: Idle → Pending → Success | Failed, and back
//! to Pending on the next submit. There is no terminal state.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::client::PredictionError;

/// The `prediction` value exactly as the endpoint returned it
///
/// Numbers keep their JSON form (`42` stays `42`, not `42.0`) and strings are
/// displayed without quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionValue(serde_json::Value);

impl PredictionValue {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.0.as_f64()
    }

    pub fn is_number(&self) -> bool {
        self.0.is_number()
    }
}

impl fmt::Display for PredictionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

impl From<serde_json::Value> for PredictionValue {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Which side of the call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The endpoint could not be reached
    Transport,
    /// The endpoint answered with something unusable
    Protocol,
}

/// Current state of the prediction display
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PredictionStatus {
    #[default]
    Idle,
    Pending,
    Success {
        prediction: PredictionValue,
    },
    Failed {
        kind: FailureKind,
        message: String,
    },
}

impl PredictionStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, PredictionStatus::Pending)
    }

    pub fn prediction(&self) -> Option<&PredictionValue> {
        match self {
            PredictionStatus::Success { prediction } => Some(prediction),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            PredictionStatus::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl From<Result<PredictionValue, PredictionError>> for PredictionStatus {
    fn from(result: Result<PredictionValue, PredictionError>) -> Self {
        match result {
            Ok(prediction) => PredictionStatus::Success { prediction },
            Err(e) => PredictionStatus::Failed {
                kind: e.kind(),
                message: e.to_string(),
            },
        }
    }
}

/// Status plus the submission it belongs to
///
/// `submission` increases by one on every submit. A result is only published
/// while its submission is still the latest one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub submission: u64,
    pub status: PredictionStatus,
    /// Milliseconds since the epoch of the last transition
    pub updated_at: i64,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            submission: 0,
            status: PredictionStatus::Idle,
            updated_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}
