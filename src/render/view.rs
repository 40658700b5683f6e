//! Dashboard view
//!
//! Picks what to draw for each controller state and composes the
//! presentation components for a ready snapshot.

use super::metrics_card::{overview_cards, render_card_row};
use super::{format_count, PredictionChart, UserTable, DEFAULT_WIDTH};
use crate::dashboard::{DashboardSnapshot, DashboardState};

/// Layout switches for the dashboard body
#[derive(Debug, Clone, Copy)]
pub struct ViewOptions {
    pub width: usize,
    /// Show the Refresh/Retry key hints
    pub interactive: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            interactive: false,
        }
    }
}

/// Render the dashboard body for `state`
pub fn render_dashboard(state: &DashboardState, options: ViewOptions) -> String {
    match state {
        DashboardState::Loading => "  ◌ Loading dashboard...".to_string(),
        DashboardState::Error(message) => render_error(message, options),
        DashboardState::Ready(snapshot) => render_ready(snapshot, options),
    }
}

fn render_error(message: &str, options: ViewOptions) -> String {
    let mut lines = vec!["✗ Error".to_string(), message.to_string()];
    if options.interactive {
        lines.push(String::new());
        lines.push("[Enter] Retry   [q] Quit".to_string());
    }
    lines.join("\n")
}

fn render_ready(snapshot: &DashboardSnapshot, options: ViewOptions) -> String {
    let analytics = &snapshot.analytics;
    let mut sections = Vec::new();

    let mut header = vec![
        "Overview".to_string(),
        format!("Last updated: {}", snapshot.updated_at.format("%H:%M:%S")),
    ];
    if options.interactive {
        header.push("[Enter] Refresh   [q] Quit".to_string());
    }
    sections.push(header.join("\n"));

    sections.push(render_card_row(&overview_cards(analytics), options.width));

    if !snapshot.timeline.is_empty() {
        sections.push(PredictionChart::new(&snapshot.timeline).render(options.width));
    }

    if !snapshot.users.is_empty() {
        sections.push(UserTable::new(&snapshot.users).render());
    }

    sections.push(format!(
        "Deployed Model\nModel version {} deployed.\nTotal predictions made: {}",
        analytics.model_version,
        format_count(analytics.total_predictions)
    ));

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::FETCH_ERROR_MESSAGE;
    use crate::testing::{sample_analytics, sample_timeline, sample_user};
    use chrono::{Local, TimeZone};

    fn snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            analytics: sample_analytics(),
            users: vec![sample_user(1, Some(0.9)), sample_user(2, Some(0.2))],
            timeline: sample_timeline(7),
            updated_at: Local.with_ymd_and_hms(2024, 3, 1, 14, 5, 9).unwrap(),
        }
    }

    #[test]
    fn test_loading_view() {
        let text = render_dashboard(&DashboardState::Loading, ViewOptions::default());
        assert!(text.contains("Loading dashboard..."));
    }

    #[test]
    fn test_error_view_has_no_data() {
        let state = DashboardState::Error(FETCH_ERROR_MESSAGE.to_string());
        let options = ViewOptions {
            interactive: true,
            ..ViewOptions::default()
        };
        let text = render_dashboard(&state, options);

        assert!(text.contains("Error"));
        assert!(text.contains(FETCH_ERROR_MESSAGE));
        assert!(text.contains("Retry"));
        assert!(!text.contains("Total Users"));
        assert!(!text.contains("User Churn Risk"));
    }

    #[test]
    fn test_ready_view_composes_sections() {
        let state = DashboardState::Ready(snapshot());
        let text = render_dashboard(&state, ViewOptions::default());

        assert!(text.contains("Last updated: 14:05:09"));
        assert!(text.contains("Total Users"));
        assert!(text.contains("Churn Predictions Over Time"));
        assert!(text.contains("User Churn Risk"));
        assert!(text.contains("Total predictions made: 48,213"));
        assert!(!text.contains("[Enter]"));
    }

    #[test]
    fn test_empty_sections_hidden() {
        let mut snapshot = snapshot();
        snapshot.users.clear();
        snapshot.timeline.clear();

        let text = render_dashboard(&DashboardState::Ready(snapshot), ViewOptions::default());
        assert!(text.contains("Total Users"));
        assert!(!text.contains("Churn Predictions Over Time"));
        assert!(!text.contains("User Churn Risk"));
    }

    #[test]
    fn test_inconsistent_counts_render() {
        let mut snapshot = snapshot();
        snapshot.analytics.total_users = 5;
        snapshot.analytics.active_users = 90;
        snapshot.analytics.churned_users = u64::MAX;
        assert!(!snapshot.analytics.is_consistent());

        let text = render_dashboard(&DashboardState::Ready(snapshot), ViewOptions::default());
        assert!(text.contains("90 active"));
    }
}
