//! Test doubles for the prediction endpoint

use async_trait::async_trait;
use axum::{
    body::Bytes,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::client::{PredictionError, Predictor};
use super::status::PredictionValue;

/// Canned HTTP reply from the mock endpoint
#[derive(Clone)]
pub struct MockReply {
    status: StatusCode,
    body: String,
}

impl MockReply {
    pub fn json(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
        }
    }

    pub fn raw(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// A request the mock endpoint received
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub content_type: Option<String>,
    pub body: Value,
}

/// A live in-process endpoint on 127.0.0.1
pub struct MockEndpoint {
    pub url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl MockEndpoint {
    pub async fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().await.clone()
    }
}

/// Serve `reply` for every `POST /predict`
pub async fn spawn_endpoint(reply: MockReply) -> MockEndpoint {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_by_handler = Arc::clone(&seen);

    let app = Router::new().route(
        "/predict",
        post(move |headers: HeaderMap, body: Bytes| {
            let seen = Arc::clone(&seen_by_handler);
            let reply = reply.clone();
            async move {
                let content_type = headers
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
                seen.lock().await.push(SeenRequest { content_type, body });
                (reply.status, reply.body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockEndpoint {
        url: format!("http://{}/predict", addr),
        seen,
    }
}

/// URL of a local port with nothing listening on it
pub async fn refused_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/predict", addr)
}

/// Predictor that plays back scripted results, each after its own delay
pub struct ScriptedPredictor {
    script: Mutex<VecDeque<(Duration, Result<PredictionValue, PredictionError>)>>,
    calls: Mutex<Vec<Vec<f64>>>,
}

impl ScriptedPredictor {
    pub fn new(script: Vec<(Duration, Result<PredictionValue, PredictionError>)>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answer immediately with `value`
    pub fn answering(value: Value) -> Self {
        Self::new(vec![(Duration::ZERO, Ok(PredictionValue::new(value)))])
    }

    pub async fn calls(&self) -> Vec<Vec<f64>> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl Predictor for ScriptedPredictor {
    async fn predict(&self, features: &[f64]) -> Result<PredictionValue, PredictionError> {
        self.calls.lock().await.push(features.to_vec());

        let next = {
            let mut script = self.script.lock().await;
            if script.len() > 1 {
                script.pop_front()
            } else {
                script.front().cloned()
            }
        };

        match next {
            Some((delay, result)) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => Err(PredictionError::Transport("script exhausted".to_string())),
        }
    }
}
