//! Feature Input Panel
//!
//! Sidebar with one number input per feature. Edits are sent to the API on
//! change; the server's answer replaces the local list.

use leptos::*;

use crate::api;
use crate::state::global::{DashboardState, Feature};

/// Sidebar input panel
#[component]
pub fn FeatureInputs() -> impl IntoView {
    let state = expect_context::<DashboardState>();

    let on_reset = move |_| {
        spawn_local(async move {
            match api::reset_features().await {
                Ok(features) => {
                    state.features.set(features);
                    state.show_success("Features reset to defaults");
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    view! {
        <div class="space-y-4">
            <h2 class="text-lg font-semibold">"Input Features"</h2>
            <p class="text-sm opacity-75">"Adjust values for prediction:"</p>

            <For
                each=move || state.features.get()
                key=|feature| (feature.index, feature.value.to_bits())
                children=move |feature| view! { <FeatureInput feature=feature /> }
            />

            <button
                on:click=on_reset
                class="w-full text-sm rounded-lg py-2 border border-gray-400 hover:bg-gray-500/20 transition-colors"
            >
                "Reset to defaults"
            </button>
        </div>
    }
}

#[component]
fn FeatureInput(feature: Feature) -> impl IntoView {
    let state = expect_context::<DashboardState>();
    let index = feature.index;
    let current = feature.value;
    let input_ref = create_node_ref::<html::Input>();

    let on_change = move |ev| {
        let text = event_target_value(&ev);
        match parse_feature_input(&text) {
            Ok(value) if value == current => {}
            Ok(value) => {
                spawn_local(async move {
                    match api::update_feature(index, value).await {
                        Ok(features) => state.features.set(features),
                        Err(e) => state.show_error(&e),
                    }
                });
            }
            Err(message) => {
                state.show_error(&message);
                // Put the last accepted value back
                if let Some(input) = input_ref.get() {
                    input.set_value(&current.to_string());
                }
            }
        }
    };

    view! {
        <label class="block">
            <span class="text-sm">{feature.name.clone()}</span>
            <input
                type="number"
                step="any"
                node_ref=input_ref
                prop:value=current.to_string()
                on:change=on_change
                class="mt-1 w-full rounded-lg px-3 py-2 border border-gray-400 bg-transparent"
            />
        </label>
    }
}

/// Parse the text of a number input
pub fn parse_feature_input(text: &str) -> Result<f64, String> {
    let text = text.trim();
    if text.is_empty() {
        return Err("A value is required".to_string());
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("{:?} is not a number", text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feature_input() {
        assert_eq!(parse_feature_input("14"), Ok(14.0));
        assert_eq!(parse_feature_input(" -2.5 "), Ok(-2.5));
        assert_eq!(parse_feature_input("1e3"), Ok(1000.0));
    }

    #[test]
    fn test_parse_feature_input_rejects() {
        assert!(parse_feature_input("").is_err());
        assert!(parse_feature_input("abc").is_err());
        assert!(parse_feature_input("inf").is_err());
        assert!(parse_feature_input("NaN").is_err());
    }
}
