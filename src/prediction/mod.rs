//! Prediction Endpoint Integration
//!
//! Sends the feature vector to the remote model and tracks the outcome.
//!
//! ## Architecture
//!
//! - **Client**: REST client for the endpoint, behind the [`Predictor`] trait
//! - **Status**: Idle / Pending / Success / Failed lifecycle
//!
//! ## Failure Modes
//!
//! 1. Transport: connection refused, timeout, DNS or TLS failure
//! 2. Protocol: non-2xx status, body not JSON, no `prediction` field
//!
//! Neither is retried.

mod client;
#[cfg(test)]
pub(crate) mod mock;
mod status;

pub use client::{
    parse_prediction, PredictionClient, PredictionConfig, PredictionError, PredictionRequest,
    Predictor,
};
pub use status::{FailureKind, PredictionStatus, PredictionValue, StatusSnapshot};
