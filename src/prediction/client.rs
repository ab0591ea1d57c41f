//! Prediction Endpoint Client
//!
//! HTTP client for the remote model endpoint. One call per `predict`, no
//! retries, no caching.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;

use super::status::{FailureKind, PredictionValue};

/// Longest slice of an error body kept in a protocol error message
const BODY_SNIPPET_LEN: usize = 200;

/// Anything that can turn a feature vector into a prediction
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, features: &[f64]) -> Result<PredictionValue, PredictionError>;
}

/// Configuration for the endpoint client
#[derive(Debug, Clone)]
pub struct PredictionConfig {
    /// Full URL the features are POSTed to
    pub endpoint_url: String,
    /// Overall request timeout. `None` keeps the transport default.
    pub request_timeout: Option<Duration>,
}

impl PredictionConfig {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            request_timeout: None,
        }
    }
}

/// REST client for the prediction endpoint
pub struct PredictionClient {
    client: Client,
    config: PredictionConfig,
}

/// Wire body sent to the endpoint
#[derive(Debug, Serialize)]
pub struct PredictionRequest<'a> {
    pub features: &'a [f64],
}

impl PredictionClient {
    /// Create a new client with the given configuration
    pub fn new(config: PredictionConfig) -> Result<Self, PredictionError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(PredictionError::transport)?;

        Ok(Self { client, config })
    }

    pub fn endpoint_url(&self) -> &str {
        &self.config.endpoint_url
    }
}

#[async_trait]
impl Predictor for PredictionClient {
    async fn predict(&self, features: &[f64]) -> Result<PredictionValue, PredictionError> {
        let url = &self.config.endpoint_url;
        let body = PredictionRequest { features };

        tracing::debug!(url = %url, features = ?features, "Sending prediction request");

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(PredictionError::transport)?;

        let status = response.status();
        let text = response.text().await.map_err(PredictionError::transport)?;

        if !status.is_success() {
            return Err(PredictionError::Protocol(format!(
                "endpoint returned HTTP {}: {}",
                status.as_u16(),
                snippet(&text)
            )));
        }

        parse_prediction(&text)
    }
}

/// Extract the `prediction` value from a response body
///
/// A missing `prediction` key is a protocol error; any present value,
/// `null` included, is returned untouched.
pub fn parse_prediction(body: &str) -> Result<PredictionValue, PredictionError> {
    let json: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        PredictionError::Protocol(format!("response is not valid JSON ({}): {}", e, snippet(body)))
    })?;

    match json.get("prediction") {
        None => Err(PredictionError::Protocol(format!(
            "response has no `prediction` field: {}",
            snippet(body)
        ))),
        Some(value) => Ok(PredictionValue::new(value.clone())),
    }
}

fn snippet(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }
    match trimmed.char_indices().nth(BODY_SNIPPET_LEN) {
        Some((end, _)) => format!("{}…", &trimmed[..end]),
        None => trimmed.to_string(),
    }
}

// ============================================
// Errors
// ============================================

/// Errors from a prediction call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// The request never got a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The endpoint responded, but not with a usable prediction
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl PredictionError {
    /// Build a transport error from a reqwest error and its source chain
    pub fn transport(e: reqwest::Error) -> Self {
        let prefix = if e.is_timeout() {
            "request timed out"
        } else if e.is_connect() {
            "connection failed"
        } else {
            "request failed"
        };

        let mut message = format!("{}: {}", prefix, e);
        let mut source = e.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        PredictionError::Transport(message)
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            PredictionError::Transport(_) => FailureKind::Transport,
            PredictionError::Protocol(_) => FailureKind::Protocol,
        }
    }
}
