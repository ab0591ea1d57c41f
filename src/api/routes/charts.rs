//! Chart Routes
//!
//! - GET /api/v1/charts - Bar chart rows for the current inputs

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::ChartsResponse;
use crate::api::state::AppState;

/// GET /api/v1/charts
///
/// The impact series is regenerated on every request.
pub async fn get_charts(State(state): State<Arc<AppState>>) -> Json<ChartsResponse> {
    let charts = state.session.charts();
    Json(ChartsResponse {
        inputs: charts.inputs,
        impact: charts.impact,
    })
}
