//! Feature Routes
//!
//! - GET /api/v1/features - All seven inputs in order
//! - PUT /api/v1/features/:index - Update one input
//! - POST /api/v1/features/reset - Restore defaults

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{FeaturesResponse, UpdateFeatureRequest};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/features
pub async fn list_features(State(state): State<Arc<AppState>>) -> Json<FeaturesResponse> {
    Json(FeaturesResponse::from(&state.session.features()))
}

/// PUT /api/v1/features/:index
///
/// Returns the full feature list after the update.
pub async fn update_feature(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
    Json(request): Json<UpdateFeatureRequest>,
) -> ApiResult<Json<FeaturesResponse>> {
    state.session.set_feature(index, request.value)?;
    Ok(Json(FeaturesResponse::from(&state.session.features())))
}

/// POST /api/v1/features/reset
pub async fn reset_features(State(state): State<Arc<AppState>>) -> Json<FeaturesResponse> {
    state.session.reset_features();
    Json(FeaturesResponse::from(&state.session.features()))
}
