//! Bar Chart Component
//!
//! Vertical bar charts drawn on HTML5 Canvas.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::global::{ChartRow, DashboardState, Palette};

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 40.0;

/// Which dataset a chart shows
#[derive(Clone, Copy, PartialEq)]
pub enum ChartKind {
    Inputs,
    Impact,
}

/// Both dashboard charts
#[component]
pub fn Charts() -> impl IntoView {
    view! {
        <div class="space-y-8">
            <section>
                <h3 class="text-xl font-semibold mb-2">"📊 Feature Values Overview"</h3>
                <BarChart kind=ChartKind::Inputs />
            </section>
            <section>
                <h3 class="text-xl font-semibold mb-2">"⚡ Feature Impact (Mockup)"</h3>
                <BarChart kind=ChartKind::Impact />
            </section>
        </div>
    }
}

/// One bar chart, redrawn when its rows or the theme change
#[component]
pub fn BarChart(kind: ChartKind) -> impl IntoView {
    let state = expect_context::<DashboardState>();
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        let charts = state.charts.get();
        let palette = state.theme.get().palette();
        let (rows, color) = match kind {
            ChartKind::Inputs => (&charts.inputs, palette.bar),
            ChartKind::Impact => (&charts.impact, palette.impact_bar),
        };

        if let Some(canvas) = canvas_ref.get() {
            draw_bars(&canvas, rows, color, &palette);
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width="800"
            height="320"
            class="w-full h-64 md:h-80 rounded-lg"
        />
    }
}

/// Position of one bar in canvas coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Top of the value axis: the largest value, or 1 when nothing is positive
pub fn axis_max(rows: &[ChartRow]) -> f64 {
    let max = rows.iter().map(|r| r.value).fold(0.0_f64, f64::max);
    if max > 0.0 {
        max
    } else {
        1.0
    }
}

/// Lay bars out left to right in row order; negative values draw as zero
pub fn layout_bars(rows: &[ChartRow], width: f64, height: f64) -> Vec<BarRect> {
    if rows.is_empty() {
        return Vec::new();
    }

    let chart_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let chart_height = height - MARGIN_TOP - MARGIN_BOTTOM;
    let slot = chart_width / rows.len() as f64;
    let bar_width = slot * 0.7;
    let max = axis_max(rows);

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let bar_height = (row.value.max(0.0) / max) * chart_height;
            BarRect {
                x: MARGIN_LEFT + i as f64 * slot + (slot - bar_width) / 2.0,
                y: MARGIN_TOP + chart_height - bar_height,
                width: bar_width,
                height: bar_height,
            }
        })
        .collect()
}

fn draw_bars(canvas: &HtmlCanvasElement, rows: &[ChartRow], color: &str, palette: &Palette) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let chart_height = height - MARGIN_TOP - MARGIN_BOTTOM;

    ctx.set_fill_style(&palette.card.into());
    ctx.fill_rect(0.0, 0.0, width, height);

    if rows.is_empty() {
        ctx.set_fill_style(&palette.text.into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No data", width / 2.0 - 30.0, height / 2.0);
        return;
    }

    // Horizontal grid lines with value labels
    let max = axis_max(rows);
    ctx.set_stroke_style(&palette.grid.into());
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=5 {
        let y = MARGIN_TOP + (i as f64 / 5.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(MARGIN_LEFT, y);
        ctx.line_to(width - MARGIN_RIGHT, y);
        ctx.stroke();

        let value = max - (i as f64 / 5.0) * max;
        ctx.set_fill_style(&palette.text.into());
        let _ = ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0);
    }

    ctx.set_fill_style(&color.into());
    for bar in layout_bars(rows, width, height) {
        ctx.fill_rect(bar.x, bar.y, bar.width, bar.height);
    }

    // Category labels under each bar
    ctx.set_fill_style(&palette.text.into());
    for (row, bar) in rows.iter().zip(layout_bars(rows, width, height)) {
        let _ = ctx.fill_text(&row.label, bar.x + bar.width / 2.0 - 8.0, height - 15.0);
    }
}
