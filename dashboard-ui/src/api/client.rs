//! HTTP API Client
//!
//! Functions for communicating with the dashboard REST API.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::state::global::{Charts, Feature, PredictionSnapshot};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8090/api/v1";

/// Local storage key overriding the API base
const API_URL_KEY: &str = "predictdash_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten());

    stored
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
        .trim_end_matches('/')
        .to_string()
}

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
pub struct FeaturesResponse {
    pub features: Vec<Feature>,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorDetail {
    message: String,
}

// ============ API Functions ============

async fn read<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error.message,
            Err(_) => format!("Request failed with status {}", status),
        };
        return Err(message);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch all features
pub async fn fetch_features() -> Result<Vec<Feature>, String> {
    let response = Request::get(&format!("{}/features", get_api_base()))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    read::<FeaturesResponse>(response).await.map(|r| r.features)
}

/// Update one feature value
pub async fn update_feature(index: usize, value: f64) -> Result<Vec<Feature>, String> {
    let body = serde_json::json!({ "value": value });

    let response = Request::put(&format!("{}/features/{}", get_api_base(), index))
        .json(&body)
        .map_err(|e| format!("Serialize error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    read::<FeaturesResponse>(response).await.map(|r| r.features)
}

/// Restore all features to their defaults
pub async fn reset_features() -> Result<Vec<Feature>, String> {
    let response = Request::post(&format!("{}/features/reset", get_api_base()))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    read::<FeaturesResponse>(response).await.map(|r| r.features)
}

/// Submit the current inputs and wait for the outcome
pub async fn submit_prediction() -> Result<PredictionSnapshot, String> {
    let response = Request::post(&format!("{}/predict?wait=true", get_api_base()))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    read(response).await
}

/// Fetch the current prediction status
pub async fn fetch_prediction() -> Result<PredictionSnapshot, String> {
    let response = Request::get(&format!("{}/prediction", get_api_base()))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    read(response).await
}

/// Fetch chart rows; the impact series is new on every call
pub async fn fetch_charts() -> Result<Charts, String> {
    let response = Request::get(&format!("{}/charts", get_api_base()))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    read(response).await
}
