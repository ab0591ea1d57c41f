//! State Management
//!
//! Dashboard session state and the WebSocket connection that keeps it live.

pub mod global;
pub mod websocket;

pub use global::{
    provide_dashboard_state, ChartRow, Charts, DashboardState, Feature, PredictionSnapshot,
    PredictionState, Theme,
};
pub use websocket::init_websocket;
