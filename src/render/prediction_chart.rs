//! Prediction Chart
//!
//! Daily average churn probability drawn as a text line plot.
//! The y-axis is always [0, 1] so charts from different cycles compare.

use super::pad;
use crate::api::PredictionTimeline;

/// Fixed y-domain of the plot
pub const Y_DOMAIN: (f64, f64) = (0.0, 1.0);

/// Plot rows, top row is 1.0 and bottom row is 0.0
const PLOT_HEIGHT: usize = 9;

/// Left gutter holding the y labels ("0.25 ┤")
const GUTTER: usize = 6;

const MARKER: char = '●';
const LINE: char = '·';

/// Timeline chart
#[derive(Debug, Clone, Copy)]
pub struct PredictionChart<'a> {
    pub points: &'a [PredictionTimeline],
}

impl<'a> PredictionChart<'a> {
    pub fn new(points: &'a [PredictionTimeline]) -> Self {
        Self { points }
    }

    /// Render the titled chart in `width` columns
    pub fn render(&self, width: usize) -> String {
        let mut out = vec!["Churn Predictions Over Time".to_string(), String::new()];

        if self.points.is_empty() {
            out.push("No prediction data".to_string());
            return out.join("\n");
        }

        let plot_width = width.saturating_sub(GUTTER).max(2);
        let grid = self.plot(plot_width);

        for (row, cells) in grid.iter().enumerate() {
            let line: String = cells.iter().collect();
            out.push(format!("{}{}", y_label(row), line.trim_end()));
        }
        out.push(format!("{:>5}└{}", "", "─".repeat(plot_width)));
        out.push(format!("{}{}", " ".repeat(GUTTER), self.x_labels(plot_width)));
        out.push(String::new());
        out.push(format!("{} Avg Churn Probability", MARKER));

        out.join("\n")
    }

    fn plot(&self, plot_width: usize) -> Vec<Vec<char>> {
        let mut grid = vec![vec![' '; plot_width]; PLOT_HEIGHT];

        let positions: Vec<(usize, Option<usize>)> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                (
                    column_for(i, self.points.len(), plot_width),
                    row_for(p.avg_churn_probability),
                )
            })
            .collect();

        // Connect neighbours first so markers land on top
        for pair in positions.windows(2) {
            if let [(x0, Some(y0)), (x1, Some(y1))] = pair {
                let (x0, x1, y0, y1) = (*x0, *x1, *y0 as f64, *y1 as f64);
                for x in (x0 + 1)..x1 {
                    let t = (x - x0) as f64 / (x1 - x0) as f64;
                    let y = (y0 + (y1 - y0) * t).round() as usize;
                    grid[y][x] = LINE;
                }
            }
        }

        for (x, y) in positions {
            if let Some(y) = y {
                grid[y][x] = MARKER;
            }
        }

        grid
    }

    fn x_labels(&self, plot_width: usize) -> String {
        let first = self.points.first().map(|p| p.date.as_str()).unwrap_or("");
        let last = self.points.last().map(|p| p.date.as_str()).unwrap_or("");

        if self.points.len() == 1 || first.len() + last.len() + 1 > plot_width {
            return first.to_string();
        }

        let gap = plot_width - first.chars().count() - last.chars().count();
        format!("{}{}{}", first, " ".repeat(gap), last)
    }
}

/// Column of point `index` out of `count`, spread across the plot
fn column_for(index: usize, count: usize, plot_width: usize) -> usize {
    if count <= 1 {
        return 0;
    }
    let x = (index as f64 * (plot_width - 1) as f64 / (count - 1) as f64).round() as usize;
    x.min(plot_width - 1)
}

/// Row for a probability, clamped to the fixed domain; NaN is not plotted
pub(crate) fn row_for(value: f64) -> Option<usize> {
    if value.is_nan() {
        return None;
    }
    let (lo, hi) = Y_DOMAIN;
    let v = value.clamp(lo, hi);
    let row = ((hi - v) / (hi - lo) * (PLOT_HEIGHT - 1) as f64).round() as usize;
    Some(row.min(PLOT_HEIGHT - 1))
}

fn y_label(row: usize) -> String {
    let step = (PLOT_HEIGHT - 1) / 4;
    if row % step == 0 {
        let (lo, hi) = Y_DOMAIN;
        let value = hi - (hi - lo) * row as f64 / (PLOT_HEIGHT - 1) as f64;
        format!("{} ┤", pad(&format!("{:.2}", value), GUTTER - 2))
    } else {
        format!("{}│", " ".repeat(GUTTER - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_timeline;

    fn point(date: &str, p: f64) -> PredictionTimeline {
        PredictionTimeline {
            date: date.to_string(),
            avg_churn_probability: p,
            prediction_count: 10,
        }
    }

    #[test]
    fn test_rows_follow_fixed_domain() {
        assert_eq!(row_for(1.0), Some(0));
        assert_eq!(row_for(0.0), Some(PLOT_HEIGHT - 1));
        assert_eq!(row_for(0.5), Some((PLOT_HEIGHT - 1) / 2));
        // Out-of-domain values are clamped, not rescaled
        assert_eq!(row_for(1.7), Some(0));
        assert_eq!(row_for(-0.2), Some(PLOT_HEIGHT - 1));
        assert_eq!(row_for(f64::NAN), None);
    }

    #[test]
    fn test_y_axis_labels() {
        assert!(y_label(0).starts_with("1.00"));
        assert!(y_label(PLOT_HEIGHT - 1).starts_with("0.00"));
        assert!(y_label(1).ends_with('│'));
    }

    #[test]
    fn test_render_places_markers() {
        let points = vec![point("2024-03-01", 1.0), point("2024-03-02", 0.0)];
        let text = PredictionChart::new(&points).render(40);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Churn Predictions Over Time");
        // Top plot row holds the first point, bottom row the second
        assert!(lines[2].starts_with("1.00 ┤●"));
        assert!(lines[2 + PLOT_HEIGHT - 1].trim_end().ends_with(MARKER));
        assert!(text.contains("2024-03-01"));
        assert!(text.contains("2024-03-02"));
        assert!(text.contains("Avg Churn Probability"));
    }

    #[test]
    fn test_render_many_points_fits_width() {
        let points = sample_timeline(30);
        let text = PredictionChart::new(&points).render(60);

        assert!(text.lines().all(|l| l.chars().count() <= 60));
        assert_eq!(text.matches(MARKER).count(), 31);
    }

    #[test]
    fn test_render_empty() {
        let text = PredictionChart::new(&[]).render(60);
        assert!(text.contains("No prediction data"));
    }
}
