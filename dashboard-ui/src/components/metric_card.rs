//! Metric Card Component
//!
//! Row of cards echoing the current feature values.

use leptos::*;

use crate::state::global::{DashboardState, NumberStyle};

/// One card per feature: short label and current value
#[component]
pub fn MetricRow() -> impl IntoView {
    let state = expect_context::<DashboardState>();

    view! {
        <div class="grid grid-cols-2 md:grid-cols-4 lg:grid-cols-7 gap-3">
            {move || {
                state.features.get()
                    .into_iter()
                    .map(|feature| view! {
                        <MetricCard
                            label=feature.short_label
                            value=feature.value
                            style=feature.style
                        />
                    })
                    .collect_view()
            }}
        </div>
    }
}

/// Metric card component
#[component]
pub fn MetricCard(
    #[prop(into)]
    label: String,
    value: f64,
    #[prop(optional)]
    style: NumberStyle,
) -> impl IntoView {
    let state = expect_context::<DashboardState>();

    view! {
        <div
            class="rounded-lg p-4 border border-gray-500/30"
            style=move || format!("background-color: {}", state.theme.get().palette().card)
        >
            <div class="text-sm opacity-75">{label}</div>
            <div class="text-2xl font-bold mt-2">{format_value(value, style)}</div>
        </div>
    }
}

/// Echo a value the way its field was declared: `14.0` for a decimal
/// field, `8` for a whole one
pub fn format_value(value: f64, style: NumberStyle) -> String {
    match style {
        NumberStyle::Decimal if value.fract() == 0.0 && value.is_finite() => {
            format!("{:.1}", value)
        }
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(4209.0, NumberStyle::Whole), "4209");
        assert_eq!(format_value(14.5, NumberStyle::Whole), "14.5");
        assert_eq!(format_value(-3.0, NumberStyle::Whole), "-3");
    }

    #[test]
    fn test_decimal_field_keeps_fraction_digit() {
        assert_eq!(format_value(14.0, NumberStyle::Decimal), "14.0");
        assert_eq!(format_value(14.25, NumberStyle::Decimal), "14.25");
    }
}
