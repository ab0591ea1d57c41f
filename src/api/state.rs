//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ApiConfig;
use crate::session::Session;
use crate::websocket::{ConnectionHub, HubConfig};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// The dashboard session: feature inputs and prediction status
    pub session: Session,
    /// Endpoint the session predicts against, for health reporting
    pub endpoint_url: String,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// WebSocket connection hub for change notifications
    pub ws_hub: Arc<ConnectionHub>,
}

impl AppState {
    pub fn new(session: Session, endpoint_url: impl Into<String>, config: ApiConfig) -> Self {
        Self::with_ws_config(session, endpoint_url, config, HubConfig::default())
    }

    /// Create AppState with custom WebSocket hub configuration
    pub fn with_ws_config(
        session: Session,
        endpoint_url: impl Into<String>,
        config: ApiConfig,
        hub_config: HubConfig,
    ) -> Self {
        Self {
            session,
            endpoint_url: endpoint_url.into(),
            config: Arc::new(config),
            start_time: Instant::now(),
            ws_hub: Arc::new(ConnectionHub::new(hub_config)),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get WebSocket connection count
    pub async fn ws_connection_count(&self) -> usize {
        self.ws_hub.connection_count().await
    }
}
