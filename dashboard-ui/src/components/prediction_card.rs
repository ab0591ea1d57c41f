//! Prediction Card
//!
//! Predict button and the result area: nothing while idle, a spinner while
//! pending, the value on success, the message on failure.

use leptos::*;

use crate::api;
use crate::components::loading::InlineLoading;
use crate::state::global::{DashboardState, PredictionState};

/// Predict button plus result display
#[component]
pub fn PredictionPanel() -> impl IntoView {
    let state = expect_context::<DashboardState>();
    let pending = create_memo(move |_| state.prediction.with(|p| p.state.is_pending()));

    let on_predict = move |_| {
        if pending.get_untracked() {
            return;
        }
        state.mark_pending();

        spawn_local(async move {
            match api::submit_prediction().await {
                Ok(snapshot) => state.apply_prediction(snapshot),
                Err(e) => {
                    // The request never reached the session; show it as a failure
                    state.prediction.update(|current| {
                        current.state = PredictionState::Failed {
                            kind: "transport".to_string(),
                            message: e.clone(),
                        };
                        current.updated_at = js_sys::Date::now() as i64;
                    });
                    state.show_error(&e);
                }
            }
        });
    };

    view! {
        <div class="space-y-4">
            <button
                on:click=on_predict
                disabled=move || pending.get()
                class="px-8 py-3 rounded-lg font-semibold text-white bg-[#1f77b4]
                       disabled:opacity-50 disabled:cursor-not-allowed transition-opacity"
            >
                "Predict"
            </button>

            <PredictionCard />
        </div>
    }
}

#[component]
fn PredictionCard() -> impl IntoView {
    let state = expect_context::<DashboardState>();

    move || match state.prediction.get().state {
        PredictionState::Idle => view! {}.into_view(),
        PredictionState::Pending => view! {
            <div class="flex items-center space-x-2">
                <InlineLoading />
                <span>"Predicting..."</span>
            </div>
        }
        .into_view(),
        PredictionState::Success { prediction } => {
            let gradient = state.theme.get().palette().accent_gradient;
            view! {
                <div
                    class="rounded-2xl p-6 text-center text-3xl font-bold text-white shadow-lg"
                    style=format!("background: {}", gradient)
                >
                    {prediction_label(&prediction)}
                </div>
            }
            .into_view()
        }
        PredictionState::Failed { message, .. } => view! {
            <div class="rounded-lg p-4 bg-red-100 text-red-800 border border-red-300">
                {format!("Error: {}", message)}
            </div>
        }
        .into_view(),
    }
}

/// `Prediction: 42` / `Prediction: approved`
pub fn prediction_label(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => format!("Prediction: {}", s),
        other => format!("Prediction: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prediction_label() {
        assert_eq!(prediction_label(&json!(42)), "Prediction: 42");
        assert_eq!(prediction_label(&json!(0.75)), "Prediction: 0.75");
        assert_eq!(prediction_label(&json!("approved")), "Prediction: approved");
    }
}
