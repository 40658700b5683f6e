//! User Table
//!
//! Per-user churn risk: tier, activity, a proportional risk bar and a
//! churned/active badge.

use super::{format_fraction, pad};
use crate::api::UserAnalytics;
use crate::risk::RiskLevel;

const BAR_WIDTH: usize = 10;

const COLUMNS: [(&str, usize); 6] = [
    ("EMAIL", 28),
    ("TIER", 10),
    ("EVENTS", 7),
    ("LAST ACTIVE", 12),
    ("CHURN RISK", 27),
    ("STATUS", 8),
];

/// Risk table over a list of users
#[derive(Debug, Clone, Copy)]
pub struct UserTable<'a> {
    pub users: &'a [UserAnalytics],
}

impl<'a> UserTable<'a> {
    pub fn new(users: &'a [UserAnalytics]) -> Self {
        Self { users }
    }

    pub fn render(&self) -> String {
        let mut lines = vec!["User Churn Risk".to_string(), String::new()];

        let header: Vec<String> = COLUMNS.iter().map(|(name, w)| pad(name, *w)).collect();
        lines.push(header.join(" ").trim_end().to_string());

        let total: usize = COLUMNS.iter().map(|(_, w)| w).sum::<usize>() + COLUMNS.len() - 1;
        lines.push("─".repeat(total));

        for user in self.users {
            lines.push(render_row(user));
        }

        lines.join("\n")
    }
}

fn render_row(user: &UserAnalytics) -> String {
    let cells = [
        user.email.clone(),
        user.subscription_tier.clone(),
        user.total_events.to_string(),
        last_active(user.days_since_last_active),
        risk_cell(user.latest_churn_prediction),
        status_badge(user.churned).to_string(),
    ];

    cells
        .iter()
        .zip(COLUMNS.iter())
        .map(|(cell, (_, w))| pad(cell, *w))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

/// "N days ago" rounded, or "Never" when the user has no activity
pub fn last_active(days: Option<f64>) -> String {
    match days {
        Some(days) => format!("{} days ago", days.round() as i64),
        None => "Never".to_string(),
    }
}

/// Bar, percentage and risk label for one prediction
pub fn risk_cell(prediction: Option<f64>) -> String {
    let level = RiskLevel::classify(prediction);
    let percent = match prediction {
        Some(p) => format_fraction(p),
        None => "N/A".to_string(),
    };

    format!("{} {:>6} {}", risk_bar(prediction, BAR_WIDTH), percent, level)
}

/// Proportional bar; a missing prediction draws as empty
pub fn risk_bar(prediction: Option<f64>, width: usize) -> String {
    let fraction = prediction.filter(|p| !p.is_nan()).unwrap_or(0.0).clamp(0.0, 1.0);
    let filled = (fraction * width as f64).round() as usize;

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn status_badge(churned: bool) -> &'static str {
    if churned {
        "Churned"
    } else {
        "Active"
    }
}
