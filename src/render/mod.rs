//! Terminal presentation
//!
//! Stateless renderers that turn dashboard data into plain text.
//! Nothing in here fetches or mutates; every function maps values to lines.
//!
//! - [`metrics_card`]: label/value cards with optional trend
//! - [`prediction_chart`]: daily churn probability plot, y fixed to [0, 1]
//! - [`user_table`]: per-user risk table
//! - [`view`]: composes the above for each dashboard state
//! - [`shell`]: header and footer frame

pub mod metrics_card;
pub mod prediction_chart;
pub mod shell;
pub mod user_table;
pub mod view;

pub use metrics_card::{overview_cards, MetricsCard, Trend};
pub use prediction_chart::PredictionChart;
pub use shell::frame;
pub use user_table::UserTable;
pub use view::{render_dashboard, ViewOptions};

/// Default terminal width in columns
pub const DEFAULT_WIDTH: usize = 100;

/// Group digits in thousands: `12480` -> `12,480`
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Shortest decimal form with at most two fraction digits: `20.0` -> `20`
pub fn format_number(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

/// Fraction as a percentage with one decimal: `0.2734` -> `27.3%`
pub fn format_fraction(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Truncate to `width` columns, marking the cut with an ellipsis
pub(crate) fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Left-align in exactly `width` columns
pub(crate) fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", fit(text, width), width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(12480), "12,480");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(20.0), "20");
        assert_eq!(format_number(18.97), "18.97");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(3.14159), "3.14");
    }

    #[test]
    fn test_format_fraction() {
        assert_eq!(format_fraction(0.2734), "27.3%");
        assert_eq!(format_fraction(1.0), "100.0%");
    }

    #[test]
    fn test_fit_and_pad() {
        assert_eq!(fit("short", 10), "short");
        assert_eq!(fit("a-very-long-email@example.com", 8), "a-very-…");
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("abcdef", 4).chars().count(), 4);
    }
}
