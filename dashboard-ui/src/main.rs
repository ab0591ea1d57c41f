//! Predictdash UI
//!
//! Single-page prediction dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Sidebar with the seven feature inputs
//! - Metric row, Predict button and prediction card
//! - Input and impact bar charts
//! - Light/Dark theme
//! - WebSocket live updates
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. The dashboard API owns the session; this crate renders it and
//! forwards edits over HTTP, and redraws from WebSocket change events.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
