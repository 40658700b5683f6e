//! User Table Component
//!
//! Per-user churn risk with a proportional risk bar and status badge.

use leptos::*;

use crate::format::format_fraction;
use crate::types::UserAnalytics;

/// Probability at or above which a user is high risk
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;

/// Probability at or above which a user is medium risk
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.4;

/// Risk tier derived from the latest churn prediction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskLevel {
    Unknown,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// `None` means the user has not been scored yet
    pub fn classify(prediction: Option<f64>) -> Self {
        match prediction {
            None => RiskLevel::Unknown,
            Some(p) if p >= HIGH_RISK_THRESHOLD => RiskLevel::High,
            Some(p) if p >= MEDIUM_RISK_THRESHOLD => RiskLevel::Medium,
            Some(_) => RiskLevel::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Unknown => "Unknown",
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    pub fn text_class(&self) -> &'static str {
        match self {
            RiskLevel::Unknown => "text-slate-400",
            RiskLevel::Low => "text-green-400",
            RiskLevel::Medium => "text-yellow-400",
            RiskLevel::High => "text-red-400",
        }
    }

    /// Unscored users get an empty bar, so the colour only matters for scored tiers
    pub fn bar_class(&self) -> &'static str {
        match self {
            RiskLevel::High => "bg-red-500",
            RiskLevel::Medium => "bg-yellow-500",
            RiskLevel::Low | RiskLevel::Unknown => "bg-green-500",
        }
    }
}

/// Bar fill in percent; missing or NaN predictions draw empty
pub fn risk_bar_width(prediction: Option<f64>) -> f64 {
    prediction
        .filter(|p| !p.is_nan())
        .unwrap_or(0.0)
        .clamp(0.0, 1.0)
        * 100.0
}

pub fn risk_percent(prediction: Option<f64>) -> String {
    match prediction {
        Some(p) => format_fraction(p),
        None => "N/A".to_string(),
    }
}

pub fn last_active(days: Option<f64>) -> String {
    match days {
        Some(days) => format!("{} days ago", days.round() as i64),
        None => "Never".to_string(),
    }
}

/// User risk table component
#[component]
pub fn UserTable(users: Vec<UserAnalytics>) -> impl IntoView {
    view! {
        <div class="bg-slate-800 rounded-lg p-6 border border-slate-700">
            <h3 class="text-xl font-semibold mb-6">"User Churn Risk"</h3>
            <div class="overflow-x-auto">
                <table class="min-w-full divide-y divide-slate-700">
                    <thead>
                        <tr>
                            {["Email", "Tier", "Events", "Last Active", "Churn Risk", "Status"]
                                .into_iter()
                                .map(|name| view! {
                                    <th class="px-6 py-3 text-left text-xs font-medium text-slate-400 uppercase tracking-wider">
                                        {name}
                                    </th>
                                })
                                .collect_view()}
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-slate-700">
                        {users.into_iter().map(|user| view! { <UserRow user=user /> }).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[component]
fn UserRow(user: UserAnalytics) -> impl IntoView {
    let prediction = user.latest_churn_prediction;
    let risk = RiskLevel::classify(prediction);

    view! {
        <tr class="hover:bg-slate-700/50 transition-colors">
            <td class="px-6 py-4 whitespace-nowrap text-sm">{user.email}</td>
            <td class="px-6 py-4 whitespace-nowrap text-sm">
                <span class="px-2 py-1 text-xs font-medium rounded-full bg-sky-900/30 text-sky-400">
                    {user.subscription_tier}
                </span>
            </td>
            <td class="px-6 py-4 whitespace-nowrap text-sm text-slate-300">{user.total_events}</td>
            <td class="px-6 py-4 whitespace-nowrap text-sm text-slate-300">
                {last_active(user.days_since_last_active)}
            </td>
            <td class="px-6 py-4 whitespace-nowrap text-sm">
                <div class="flex items-center">
                    <div class="flex-1 bg-slate-700 rounded-full h-2 mr-2 min-w-[6rem]">
                        <div
                            class=format!("h-2 rounded-full {}", risk.bar_class())
                            style=format!("width: {}%", risk_bar_width(prediction))
                        />
                    </div>
                    <span class=format!("text-xs font-medium {}", risk.text_class())>
                        {risk_percent(prediction)}
                    </span>
                    <span class=format!("ml-2 text-xs {}", risk.text_class())>{risk.label()}</span>
                </div>
            </td>
            <td class="px-6 py-4 whitespace-nowrap text-sm">
                {if user.churned {
                    view! {
                        <span class="px-2 py-1 text-xs font-medium rounded-full bg-red-900/30 text-red-400">
                            "Churned"
                        </span>
                    }
                } else {
                    view! {
                        <span class="px-2 py-1 text-xs font-medium rounded-full bg-green-900/30 text-green-400">
                            "Active"
                        </span>
                    }
                }}
            </td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(RiskLevel::classify(Some(0.75)), RiskLevel::High);
        assert_eq!(RiskLevel::classify(Some(0.7)), RiskLevel::High);
        assert_eq!(RiskLevel::classify(Some(0.5)), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(Some(0.4)), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(Some(0.1)), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(Some(f64::NAN)), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(None), RiskLevel::Unknown);
    }

    #[test]
    fn test_risk_bar_width() {
        assert_eq!(risk_bar_width(Some(0.5)), 50.0);
        assert_eq!(risk_bar_width(None), 0.0);
        assert_eq!(risk_bar_width(Some(1.3)), 100.0);
        assert_eq!(risk_bar_width(Some(f64::NAN)), 0.0);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(risk_percent(Some(0.823)), "82.3%");
        assert_eq!(risk_percent(None), "N/A");
        assert_eq!(last_active(Some(2.6)), "3 days ago");
        assert_eq!(last_active(None), "Never");
    }
}
