//! Prediction Chart Component
//!
//! Daily average churn probability on an HTML5 canvas.
//! The y-axis is pinned to [0, 1] regardless of the data.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::types::PredictionTimeline;

const SERIES_COLOR: &str = "#0ea5e9";
const GRID_COLOR: &str = "#334155";
const AXIS_COLOR: &str = "#94a3b8";

const MARGIN_LEFT: f64 = 50.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 40.0;

/// Horizontal grid lines, one per 0.2
const Y_STEPS: usize = 5;

/// At most this many date labels under the x-axis
const MAX_X_LABELS: usize = 6;

/// Timeline chart component
#[component]
pub fn PredictionChart(
    /// Daily points, oldest first
    data: Vec<PredictionTimeline>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &data);
        }
    });

    view! {
        <div class="bg-slate-800 rounded-lg p-6 border border-slate-700">
            <h3 class="text-xl font-semibold mb-6">"Churn Predictions Over Time"</h3>
            <canvas
                node_ref=canvas_ref
                width="800"
                height="300"
                class="w-full h-72 rounded-lg"
            />
            <div class="flex justify-center items-center space-x-2 mt-4">
                <span
                    class="w-3 h-3 rounded-full"
                    style=format!("background-color: {}", SERIES_COLOR)
                />
                <span class="text-sm text-slate-400">"Avg Churn Probability"</span>
            </div>
        </div>
    }
}

/// Canvas y for a probability; out-of-range values are clamped to the frame
fn y_for(value: f64, top: f64, height: f64) -> Option<f64> {
    if value.is_nan() {
        return None;
    }
    Some(top + (1.0 - value.clamp(0.0, 1.0)) * height)
}

/// Canvas x for the `index`-th of `count` evenly spaced points
fn x_for(index: usize, count: usize, left: f64, width: f64) -> f64 {
    if count <= 1 {
        return left + width / 2.0;
    }
    left + index as f64 / (count - 1) as f64 * width
}

/// Indices that get a date label, evenly spread and always including the last
fn label_indices(count: usize) -> Vec<usize> {
    if count <= MAX_X_LABELS {
        return (0..count).collect();
    }

    let step = (count - 1) as f64 / (MAX_X_LABELS - 1) as f64;
    (0..MAX_X_LABELS)
        .map(|i| (i as f64 * step).round() as usize)
        .collect()
}

/// "2024-03-01" -> "03/01"; anything unparseable is shown as-is
fn short_date(date: &str) -> String {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%m/%d").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// Draw the chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, data: &[PredictionTimeline]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let chart_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let chart_height = height - MARGIN_TOP - MARGIN_BOTTOM;

    ctx.set_fill_style(&"#1e293b".into());
    ctx.fill_rect(0.0, 0.0, width, height);

    // Grid and y labels
    ctx.set_stroke_style(&GRID_COLOR.into());
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=Y_STEPS {
        let value = 1.0 - i as f64 / Y_STEPS as f64;
        let y = MARGIN_TOP + i as f64 / Y_STEPS as f64 * chart_height;

        ctx.begin_path();
        ctx.move_to(MARGIN_LEFT, y);
        ctx.line_to(width - MARGIN_RIGHT, y);
        ctx.stroke();

        ctx.set_fill_style(&AXIS_COLOR.into());
        let _ = ctx.fill_text(&format!("{:.1}", value), 10.0, y + 4.0);
    }

    if data.is_empty() {
        ctx.set_fill_style(&"#64748b".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No prediction data", width / 2.0 - 70.0, height / 2.0);
        return;
    }

    let points: Vec<(f64, Option<f64>)> = data
        .iter()
        .enumerate()
        .map(|(i, p)| {
            (
                x_for(i, data.len(), MARGIN_LEFT, chart_width),
                y_for(p.avg_churn_probability, MARGIN_TOP, chart_height),
            )
        })
        .collect();

    // Line, broken wherever a value is missing
    ctx.set_stroke_style(&SERIES_COLOR.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();
    let mut pen_down = false;
    for (x, y) in &points {
        match y {
            Some(y) if pen_down => ctx.line_to(*x, *y),
            Some(y) => {
                ctx.move_to(*x, *y);
                pen_down = true;
            }
            None => pen_down = false,
        }
    }
    ctx.stroke();

    ctx.set_fill_style(&SERIES_COLOR.into());
    for (x, y) in &points {
        if let Some(y) = y {
            ctx.begin_path();
            let _ = ctx.arc(*x, *y, 4.0, 0.0, std::f64::consts::PI * 2.0);
            ctx.fill();
        }
    }

    ctx.set_fill_style(&AXIS_COLOR.into());
    ctx.set_font("12px sans-serif");
    for i in label_indices(data.len()) {
        let (x, _) = points[i];
        let _ = ctx.fill_text(&short_date(&data[i].date), x - 15.0, height - 12.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_y_domain_is_fixed() {
        assert_eq!(y_for(1.0, 20.0, 100.0), Some(20.0));
        assert_eq!(y_for(0.0, 20.0, 100.0), Some(120.0));
        assert_eq!(y_for(0.25, 0.0, 100.0), Some(75.0));
    }

    #[test]
    fn test_y_clamps_and_skips_nan() {
        assert_eq!(y_for(1.7, 0.0, 100.0), Some(0.0));
        assert_eq!(y_for(-0.2, 0.0, 100.0), Some(100.0));
        assert_eq!(y_for(f64::NAN, 0.0, 100.0), None);
    }

    #[test]
    fn test_x_spacing() {
        assert_eq!(x_for(0, 5, 50.0, 400.0), 50.0);
        assert_eq!(x_for(4, 5, 50.0, 400.0), 450.0);
        assert_eq!(x_for(0, 1, 50.0, 400.0), 250.0);
    }

    #[test]
    fn test_label_indices() {
        assert_eq!(label_indices(3), vec![0, 1, 2]);

        let indices = label_indices(30);
        assert_eq!(indices.len(), MAX_X_LABELS);
        assert_eq!(indices.first(), Some(&0));
        assert_eq!(indices.last(), Some(&29));
    }

    #[test]
    fn test_short_date() {
        assert_eq!(short_date("2024-03-01"), "03/01");
        assert_eq!(short_date("yesterday"), "yesterday");
    }
}
