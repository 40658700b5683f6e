//! Metrics Card
//!
//! A boxed label/value card with optional subtitle, icon and trend.

use super::{fit, format_count, format_fraction, format_number, pad};
use crate::api::AnalyticsData;

/// Change versus the previous period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    /// Percentage change; only the magnitude is shown
    pub value: f64,
    pub is_positive: bool,
}

impl Trend {
    pub fn render(&self) -> String {
        let arrow = if self.is_positive { "↑" } else { "↓" };
        format!("{} {}% vs last period", arrow, format_number(self.value.abs()))
    }
}

/// One overview card
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsCard {
    pub title: String,
    pub value: String,
    pub subtitle: Option<String>,
    pub icon: Option<&'static str>,
    pub trend: Option<Trend>,
}

impl MetricsCard {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            subtitle: None,
            icon: None,
            trend: None,
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn trend(mut self, trend: Trend) -> Self {
        self.trend = Some(trend);
        self
    }

    /// Render as boxed lines exactly `width` columns wide
    pub fn lines(&self, width: usize) -> Vec<String> {
        let width = width.max(8);
        let inner = width - 4;

        let mut body = Vec::with_capacity(4);

        let header = match self.icon {
            Some(icon) => {
                let title_width = inner.saturating_sub(icon.chars().count() + 1);
                format!("{} {}", pad(&self.title, title_width), icon)
            }
            None => self.title.clone(),
        };
        body.push(header);
        body.push(self.value.clone());
        if let Some(subtitle) = &self.subtitle {
            body.push(subtitle.clone());
        }
        if let Some(trend) = &self.trend {
            body.push(trend.render());
        }

        let mut lines = Vec::with_capacity(body.len() + 2);
        lines.push(format!("┌{}┐", "─".repeat(width - 2)));
        for line in body {
            lines.push(format!("│ {} │", pad(&fit(&line, inner), inner)));
        }
        lines.push(format!("└{}┘", "─".repeat(width - 2)));
        lines
    }

    pub fn render(&self, width: usize) -> String {
        self.lines(width).join("\n")
    }
}

/// The four headline cards for an analytics snapshot
pub fn overview_cards(analytics: &AnalyticsData) -> Vec<MetricsCard> {
    let accuracy = match analytics.model_accuracy {
        Some(accuracy) if accuracy != 0.0 => format_fraction(accuracy),
        _ => "N/A".to_string(),
    };

    vec![
        MetricsCard::new("Total Users", format_count(analytics.total_users))
            .subtitle(format!("{} active", analytics.active_users))
            .icon("@"),
        MetricsCard::new("Churn Rate", format!("{}%", format_number(analytics.churn_rate)))
            .subtitle(format!("{} churned users", analytics.churned_users))
            .icon("%"),
        MetricsCard::new(
            "Avg Churn Probability",
            format_fraction(analytics.avg_churn_probability),
        )
        .subtitle("Across all predictions")
        .icon("≈"),
        MetricsCard::new("Model Accuracy", accuracy)
            .subtitle(format!("Version: {}", analytics.model_version))
            .icon("✓"),
    ]
}

/// Lay cards side by side, padding shorter cards so the row is rectangular
pub fn render_card_row(cards: &[MetricsCard], width: usize) -> String {
    if cards.is_empty() {
        return String::new();
    }

    let gap = 2;
    let card_width = (width.saturating_sub(gap * (cards.len() - 1)) / cards.len()).max(8);

    let rendered: Vec<Vec<String>> = cards.iter().map(|c| c.lines(card_width)).collect();
    let height = rendered.iter().map(Vec::len).max().unwrap_or(0);

    (0..height)
        .map(|row| {
            rendered
                .iter()
                .map(|lines| match lines.get(row) {
                    Some(line) => line.clone(),
                    None => " ".repeat(card_width),
                })
                .collect::<Vec<_>>()
                .join(&" ".repeat(gap))
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
