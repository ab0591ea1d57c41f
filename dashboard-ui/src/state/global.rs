//! Dashboard State
//!
//! Reactive session state using Leptos signals. Created once at the app root
//! and handed to components through context.

use leptos::*;
use serde::{Deserialize, Serialize};

/// Session state shared by all components
#[derive(Clone, Copy)]
pub struct DashboardState {
    /// Feature inputs in display order
    pub features: RwSignal<Vec<Feature>>,
    /// Latest prediction status
    pub prediction: RwSignal<PredictionSnapshot>,
    /// Chart rows for the current render pass
    pub charts: RwSignal<Charts>,
    /// Selected theme
    pub theme: RwSignal<Theme>,
    /// WebSocket connection status
    pub ws_connected: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// One feature input as served by the API
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Feature {
    pub index: usize,
    pub name: String,
    pub short_label: String,
    pub value: f64,
    pub default_value: f64,
    #[serde(default)]
    pub style: NumberStyle,
}

/// How the metric row echoes a value: `14.0` for decimal fields, `8` for whole
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberStyle {
    #[default]
    Whole,
    Decimal,
}

/// Prediction lifecycle as served by the API
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PredictionState {
    #[default]
    Idle,
    Pending,
    Success {
        prediction: serde_json::Value,
    },
    Failed {
        #[serde(default)]
        kind: String,
        message: String,
    },
}

impl PredictionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, PredictionState::Pending)
    }

    fn rank(&self) -> u8 {
        match self {
            PredictionState::Idle => 0,
            PredictionState::Pending => 1,
            PredictionState::Success { .. } | PredictionState::Failed { .. } => 2,
        }
    }
}

/// Status plus the submission number it belongs to
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct PredictionSnapshot {
    pub submission: u64,
    #[serde(flatten)]
    pub state: PredictionState,
    #[serde(default)]
    pub updated_at: i64,
}

/// One bar
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ChartRow {
    pub label: String,
    pub value: f64,
}

/// Both bar chart datasets
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Charts {
    pub inputs: Vec<ChartRow>,
    pub impact: Vec<ChartRow>,
}

/// Colour scheme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Colours for one theme
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
    pub card: &'static str,
    pub accent_gradient: &'static str,
    pub grid: &'static str,
    pub bar: &'static str,
    pub impact_bar: &'static str,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: "#f5f7fa",
                text: "#0f111a",
                card: "#ffffff",
                accent_gradient: "linear-gradient(135deg, #4CAF50, #81C784)",
                grid: "#d1d5db",
                bar: "#1f77b4",
                impact_bar: "#4CAF50",
            },
            Theme::Dark => Palette {
                background: "#1e1e2f",
                text: "#f5f5f5",
                card: "#2c2c3c",
                accent_gradient: "linear-gradient(135deg, #667eea, #764ba2)",
                grid: "#3f3f55",
                bar: "#667eea",
                impact_bar: "#a78bfa",
            },
        }
    }
}

/// Provide dashboard state to the component tree
pub fn provide_dashboard_state() -> DashboardState {
    let state = DashboardState {
        features: create_rw_signal(Vec::new()),
        prediction: create_rw_signal(PredictionSnapshot::default()),
        charts: create_rw_signal(Charts::default()),
        theme: create_rw_signal(Theme::default()),
        ws_connected: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
    state
}

/// Whether `incoming` should replace `current`
///
/// HTTP responses and WebSocket events can arrive out of order; an older
/// submission never overwrites a newer one. Within one submission a Pending
/// stamped in the same millisecond as its outcome ranks below it.
pub fn supersedes(current: &PredictionSnapshot, incoming: &PredictionSnapshot) -> bool {
    if incoming.submission != current.submission {
        return incoming.submission > current.submission;
    }
    (incoming.updated_at, incoming.state.rank()) >= (current.updated_at, current.state.rank())
}

impl DashboardState {
    /// Apply a prediction snapshot unless a newer one is already shown
    pub fn apply_prediction(&self, snapshot: PredictionSnapshot) {
        self.prediction.update(|current| {
            if supersedes(current, &snapshot) {
                *current = snapshot;
            }
        });
    }

    /// Show the loading indicator while the submit request is in flight
    pub fn mark_pending(&self) {
        self.prediction.update(|current| current.state = PredictionState::Pending);
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
