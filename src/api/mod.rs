//! Dashboard REST API
//!
//! HTTP API layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Features
//! - `GET /api/v1/features` - List the seven inputs
//! - `PUT /api/v1/features/:index` - Update one input
//! - `POST /api/v1/features/reset` - Restore defaults
//!
//! ## Prediction
//! - `POST /api/v1/predict` - Submit current inputs (`?wait=true` to block)
//! - `GET /api/v1/prediction` - Current status
//!
//! ## Charts
//! - `GET /api/v1/charts` - Input and impact bar chart rows
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /api/v1/ws` - Change notifications for `features` and `prediction`
//!
//! # Example
//!
//! ```rust,ignore
//! use predictdash::api::{serve, AppState};
//! use predictdash::config::Config;
//! use predictdash::prediction::PredictionClient;
//! use predictdash::session::Session;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let client = PredictionClient::new(config.endpoint.prediction_config())?;
//!     let session = Session::new(Arc::new(client), config.endpoint.session_config());
//!
//!     let state = AppState::new(session, &config.endpoint.url, config.api.clone());
//!     serve(state).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;
use crate::websocket::{spawn_session_relay, websocket_handler};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Feature routes
        .route("/features", get(routes::features::list_features))
        .route("/features/reset", post(routes::features::reset_features))
        .route("/features/:index", put(routes::features::update_feature))
        // Prediction routes
        .route("/predict", post(routes::predict::submit_prediction))
        .route("/prediction", get(routes::predict::get_prediction))
        // Chart routes
        .route("/charts", get(routes::charts::get_charts))
        // WebSocket route
        .route("/ws", get(websocket_handler));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config);
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

fn cors_layer(config: &ApiConfig) -> CorsLayer {
    if config.cors_origins.is_empty() || config.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.addr();
    let relay = spawn_session_relay(&state.session, Arc::clone(&state.ws_hub));
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Dashboard API listening on {}", addr);

    let result = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)));

    relay.abort();
    result?;

    tracing::info!("Dashboard API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::mock::ScriptedPredictor;
    use crate::session::{Session, SessionConfig};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::util::ServiceExt;

    fn create_test_app(prediction: Value) -> Router {
        let session = Session::new(
            Arc::new(ScriptedPredictor::answering(prediction)),
            SessionConfig {
                loading_delay: Duration::ZERO,
            },
        );
        let state = AppState::new(session, "http://model.test/predict", ApiConfig::default());
        build_router(state)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn send_json(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app(json!(1));
        let response = app.oneshot(get("/health/live")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let app = create_test_app(json!(1));
        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["endpoint"], "http://model.test/predict");
    }

    #[tokio::test]
    async fn test_list_features() {
        let app = create_test_app(json!(1));
        let response = app.oneshot(get("/api/v1/features")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let features = body["features"].as_array().unwrap();
        assert_eq!(features.len(), 7);
        assert_eq!(features[0]["name"], "Feature 1 (Age)");
        assert_eq!(features[4]["value"], json!(4209.0));
    }

    #[tokio::test]
    async fn test_update_feature() {
        let app = create_test_app(json!(1));

        let response = app
            .clone()
            .oneshot(send_json("PUT", "/api/v1/features/3", r#"{"value": 170.5}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["features"][3]["value"], json!(170.5));
        assert_eq!(body["features"][2]["value"], json!(350.0));

        let response = app.oneshot(get("/api/v1/charts")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["inputs"][3], json!({"label": "F4", "value": 170.5}));
    }

    #[tokio::test]
    async fn test_update_feature_out_of_range() {
        let app = create_test_app(json!(1));
        let response = app
            .oneshot(send_json("PUT", "/api/v1/features/7", r#"{"value": 1}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_update_feature_invalid_json() {
        let app = create_test_app(json!(1));
        let response = app
            .oneshot(send_json("PUT", "/api/v1/features/0", "not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reset_features() {
        let app = create_test_app(json!(1));
        app.clone()
            .oneshot(send_json("PUT", "/api/v1/features/0", r#"{"value": 99}"#))
            .await
            .unwrap();

        let response = app
            .oneshot(send_json("POST", "/api/v1/features/reset", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["features"][0]["value"], json!(14.0));
    }

    #[tokio::test]
    async fn test_prediction_starts_idle() {
        let app = create_test_app(json!(1));
        let response = app.oneshot(get("/api/v1/prediction")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["state"], "idle");
        assert_eq!(body["submission"], 0);
    }

    #[tokio::test]
    async fn test_predict_returns_pending() {
        let app = create_test_app(json!(42));
        let response = app
            .oneshot(send_json("POST", "/api/v1/predict", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let body = body_json(response).await;
        assert_eq!(body["state"], "pending");
        assert_eq!(body["submission"], 1);
    }

    #[tokio::test]
    async fn test_predict_wait() {
        let app = create_test_app(json!(42));
        let response = app
            .clone()
            .oneshot(send_json("POST", "/api/v1/predict?wait=true", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["state"], "success");
        assert_eq!(body["prediction"], json!(42));

        let response = app.oneshot(get("/api/v1/prediction")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["prediction"], json!(42));
    }

    #[tokio::test]
    async fn test_charts() {
        let app = create_test_app(json!(1));
        let response = app.oneshot(get("/api/v1/charts")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["inputs"].as_array().unwrap().len(), 7);
        assert_eq!(body["inputs"][0], json!({"label": "F1", "value": 14.0}));

        let impact = body["impact"].as_array().unwrap();
        assert_eq!(impact.len(), 7);
        for (i, row) in impact.iter().enumerate() {
            assert_eq!(row["label"], format!("F{}", i + 1));
            let v = row["value"].as_f64().unwrap();
            assert!((10.0..100.0).contains(&v));
        }
    }
}
