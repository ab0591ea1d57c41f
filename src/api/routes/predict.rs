//! Prediction Routes
//!
//! - POST /api/v1/predict - Submit the current inputs
//! - GET /api/v1/prediction - Current status

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{PredictParams, PredictionResponse};
use crate::api::state::AppState;

/// POST /api/v1/predict
///
/// Responds 202 with the Pending status right away. With `?wait=true` the
/// response is held until this submission resolves and returns 200 with the
/// current status.
pub async fn submit_prediction(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PredictParams>,
) -> (StatusCode, Json<PredictionResponse>) {
    let handle = state.session.submit();

    if !params.wait {
        return (
            StatusCode::ACCEPTED,
            Json(PredictionResponse::from(state.session.snapshot())),
        );
    }

    if let Err(e) = handle.await {
        tracing::error!(error = %e, "Prediction task did not complete");
    }

    (
        StatusCode::OK,
        Json(PredictionResponse::from(state.session.snapshot())),
    )
}

/// GET /api/v1/prediction
pub async fn get_prediction(State(state): State<Arc<AppState>>) -> Json<PredictionResponse> {
    Json(PredictionResponse::from(state.session.snapshot()))
}
