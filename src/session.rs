//! Dashboard Session
//!
//! Session-scoped state for a single user: the feature inputs and the
//! prediction status. Both live in `watch` channels so the rendering side can
//! subscribe and redraw on change instead of polling.
//!
//! `submit` marks the status Pending before it returns, then runs the call on
//! a spawned task. Overlapping submits are last-write-wins: each submit gets a
//! new submission number and a result is only published while its number is
//! still the latest.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::chart::ChartSet;
use crate::features::{FeatureError, FeatureSet};
use crate::prediction::{FailureKind, PredictionStatus, Predictor, StatusSnapshot};

/// Session behaviour knobs
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Pause before the call so the loading indicator is perceptible.
    /// Zero disables it.
    pub loading_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            loading_delay: Duration::from_millis(1000),
        }
    }
}

/// One user's dashboard state
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    predictor: Arc<dyn Predictor>,
    config: SessionConfig,
    features: watch::Sender<FeatureSet>,
    status: watch::Sender<StatusSnapshot>,
}

impl Session {
    /// Create a session with default feature values and an Idle status
    pub fn new(predictor: Arc<dyn Predictor>, config: SessionConfig) -> Self {
        let (features, _) = watch::channel(FeatureSet::with_defaults());
        let (status, _) = watch::channel(StatusSnapshot::default());

        Self {
            inner: Arc::new(SessionInner {
                predictor,
                config,
                features,
                status,
            }),
        }
    }

    /// Snapshot of the current feature inputs
    pub fn features(&self) -> FeatureSet {
        self.inner.features.borrow().clone()
    }

    /// Current values in field order
    pub fn values(&self) -> Vec<f64> {
        self.inner.features.borrow().values()
    }

    /// Update one feature and notify subscribers
    pub fn set_feature(&self, index: usize, value: f64) -> Result<(), FeatureError> {
        let mut result = Ok(());
        self.inner.features.send_if_modified(|set| {
            result = set.set_value(index, value);
            result.is_ok()
        });

        if result.is_ok() {
            tracing::debug!(index, value, "Feature updated");
        }
        result
    }

    /// Restore all features to their defaults
    pub fn reset_features(&self) {
        self.inner.features.send_modify(FeatureSet::reset);
        tracing::debug!("Features reset to defaults");
    }

    /// Current prediction status
    pub fn status(&self) -> PredictionStatus {
        self.inner.status.borrow().status.clone()
    }

    /// Current status with its submission number
    pub fn snapshot(&self) -> StatusSnapshot {
        self.inner.status.borrow().clone()
    }

    /// Both chart datasets for the current inputs
    ///
    /// The impact series is regenerated on every call.
    pub fn charts(&self) -> ChartSet {
        ChartSet::derive(&self.values())
    }

    pub fn subscribe_features(&self) -> watch::Receiver<FeatureSet> {
        self.inner.features.subscribe()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<StatusSnapshot> {
        self.inner.status.subscribe()
    }

    /// Start a prediction for the current inputs
    ///
    /// The status is Pending by the time this returns. The handle resolves to
    /// the status this submission produced, which is only published if no
    /// newer submission started in the meantime.
    pub fn submit(&self) -> JoinHandle<PredictionStatus> {
        let mut submission = 0;
        self.inner.status.send_modify(|snapshot| {
            snapshot.submission += 1;
            snapshot.status = PredictionStatus::Pending;
            snapshot.updated_at = chrono::Utc::now().timestamp_millis();
            submission = snapshot.submission;
        });

        let features = self.values();
        tracing::info!(submission, features = ?features, "Prediction submitted");

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move { inner.run(submission, features).await })
    }

    /// Submit and wait for this submission's outcome
    pub async fn submit_and_wait(&self) -> PredictionStatus {
        match self.submit().await {
            Ok(status) => status,
            Err(e) => {
                tracing::error!(error = %e, "Prediction task did not complete");
                PredictionStatus::Failed {
                    kind: FailureKind::Transport,
                    message: format!("Prediction task did not complete: {}", e),
                }
            }
        }
    }
}

impl SessionInner {
    async fn run(&self, submission: u64, features: Vec<f64>) -> PredictionStatus {
        if !self.config.loading_delay.is_zero() {
            tokio::time::sleep(self.config.loading_delay).await;
        }

        let status = PredictionStatus::from(self.predictor.predict(&features).await);

        match &status {
            PredictionStatus::Success { prediction } => {
                tracing::info!(submission, prediction = %prediction, "Prediction succeeded");
            }
            PredictionStatus::Failed { kind, message } => {
                tracing::warn!(submission, kind = ?kind, error = %message, "Prediction failed");
            }
            _ => {}
        }

        let published = self.status.send_if_modified(|snapshot| {
            if snapshot.submission != submission {
                return false;
            }
            snapshot.status = status.clone();
            snapshot.updated_at = chrono::Utc::now().timestamp_millis();
            true
        });

        if !published {
            tracing::debug!(submission, "Result superseded by a newer submission");
        }

        status
    }
}
