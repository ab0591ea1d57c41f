//! App Root Component
//!
//! Page layout, theme and the session state provider.

use leptos::*;

use crate::api;
use crate::components::{Charts, FeatureInputs, Loading, MetricRow, PredictionPanel, Toast};
use crate::state::global::{provide_dashboard_state, DashboardState, Theme};
use crate::state::websocket::init_websocket;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_dashboard_state();

    // Initial load; the WebSocket greeting carries the same data once it opens
    spawn_local(async move {
        match api::fetch_features().await {
            Ok(features) => state.features.set(features),
            Err(e) => state.show_error(&e),
        }
        match api::fetch_prediction().await {
            Ok(snapshot) => state.apply_prediction(snapshot),
            Err(e) => web_sys::console::error_1(&format!("Failed to load prediction: {}", e).into()),
        }
    });

    init_websocket(state, &api::get_api_base());

    // Every render pass gets fresh chart rows, so the impact mockup changes
    // whenever the inputs or the prediction do
    create_effect(move |_| {
        state.features.track();
        state.prediction.track();

        spawn_local(async move {
            match api::fetch_charts().await {
                Ok(charts) => state.charts.set(charts),
                Err(e) => web_sys::console::error_1(&format!("Failed to load charts: {}", e).into()),
            }
        });
    });

    let palette = move || state.theme.get().palette();

    view! {
        <div
            class="min-h-screen flex"
            style=move || format!("background-color: {}; color: {}", palette().background, palette().text)
        >
            <aside
                class="w-72 shrink-0 p-6 space-y-6 border-r border-gray-500/30"
                style=move || format!("background-color: {}", palette().card)
            >
                <ThemeSelect />
                <FeatureInputs />
            </aside>

            <main class="flex-1 px-8 py-8 space-y-8">
                <h1 class="text-4xl font-bold text-center text-[#1f77b4]">
                    "🤖 ML Model Prediction Dashboard"
                </h1>
                <p class="text-center opacity-75">
                    "Enter feature values in the sidebar and click "
                    <strong>"Predict"</strong>
                    " to get the prediction."
                </p>

                {move || {
                    if state.features.with(|f| f.is_empty()) {
                        view! { <Loading /> }.into_view()
                    } else {
                        view! { <MetricRow /> }.into_view()
                    }
                }}

                <PredictionPanel />
                <Charts />
            </main>

            <ConnectionBadge />
            <Toast />
        </div>
    }
}

/// Light/Dark selector
#[component]
fn ThemeSelect() -> impl IntoView {
    let state = expect_context::<DashboardState>();

    let on_change = move |ev| {
        if let Some(theme) = Theme::from_label(&event_target_value(&ev)) {
            state.theme.set(theme);
        }
    };

    view! {
        <label class="block">
            <span class="text-sm font-medium">"Select Theme"</span>
            <select
                on:change=on_change
                class="mt-1 w-full rounded-lg px-3 py-2 border border-gray-400 bg-transparent"
            >
                {Theme::ALL
                    .into_iter()
                    .map(|theme| view! {
                        <option
                            value=theme.label()
                            selected=move || state.theme.get() == theme
                        >
                            {theme.label()}
                        </option>
                    })
                    .collect_view()}
            </select>
        </label>
    }
}

/// Live connection indicator
#[component]
fn ConnectionBadge() -> impl IntoView {
    let state = expect_context::<DashboardState>();

    view! {
        <div class="fixed top-4 right-4 text-xs">
            {move || {
                if state.ws_connected.get() {
                    view! {
                        <span class="flex items-center space-x-1 text-green-500">
                            <span class="w-2 h-2 bg-green-500 rounded-full" />
                            <span>"Live"</span>
                        </span>
                    }
                    .into_view()
                } else {
                    view! {
                        <span class="flex items-center space-x-1 text-red-500">
                            <span class="w-2 h-2 bg-red-500 rounded-full" />
                            <span>"Offline"</span>
                        </span>
                    }
                    .into_view()
                }
            }}
        </div>
    }
}
