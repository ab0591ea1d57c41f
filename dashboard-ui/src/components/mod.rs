//! UI Components
//!
//! Leptos components for the dashboard page.

pub mod bar_chart;
pub mod feature_input;
pub mod loading;
pub mod metric_card;
pub mod prediction_card;
pub mod toast;

pub use bar_chart::Charts;
pub use feature_input::FeatureInputs;
pub use loading::Loading;
pub use metric_card::MetricRow;
pub use prediction_card::PredictionPanel;
pub use toast::Toast;
