//! # Predictdash
//!
//! A single-page prediction dashboard: seven numeric feature inputs, a
//! Predict action that posts them to a remote model endpoint, a status panel
//! and two bar charts.
//!
//! ## Features
//!
//! - **Feature inputs**: Seven labelled values with sensible defaults
//! - **Prediction**: Async POST with an Idle/Pending/Success/Failed lifecycle
//! - **Charts**: Input values plus a randomized "impact" mockup
//! - **Real-time**: WebSocket change notifications for the browser UI
//!
//! ## Modules
//!
//! - [`features`]: Feature definitions and the editable input set
//! - [`prediction`]: Endpoint client and status types
//! - [`session`]: Per-user state with last-write-wins submits
//! - [`chart`]: Bar chart data derivation
//! - [`api`]: REST API server with Axum
//! - [`websocket`]: Change notifications
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use predictdash::{PredictionClient, PredictionConfig, Session, SessionConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PredictionClient::new(PredictionConfig::new(
//!         "https://fastapi-ml-app-62il.onrender.com/predict",
//!     ))?;
//!     let session = Session::new(Arc::new(client), SessionConfig::default());
//!
//!     session.set_feature(0, 18.0)?;
//!     let status = session.submit_and_wait().await;
//!     println!("{:?}", status);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod features;
pub mod prediction;
pub mod session;
pub mod websocket;

// Re-export top-level types for convenience
pub use features::{
    FeatureError, FeatureField, FeatureSet, NumberStyle, FEATURE_COUNT, FEATURE_DEFAULTS,
};

pub use chart::{derive_impact_chart, derive_input_chart, ChartRow, ChartSet};

pub use prediction::{
    FailureKind, PredictionClient, PredictionConfig, PredictionError, PredictionStatus,
    PredictionValue, Predictor, StatusSnapshot,
};

pub use session::{Session, SessionConfig};

pub use api::{build_router, serve, ApiError, AppState};

pub use websocket::{
    spawn_session_relay, websocket_handler, ClientMessage, ConnectionHub, HubConfig, HubError,
    ServerMessage, WsEvent,
};

pub use config::{ApiConfig, Config, ConfigError, DefaultLoad, EndpointConfig, LoggingConfig};
