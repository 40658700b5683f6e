//! Metrics Card Component
//!
//! Displays a single headline figure with optional subtitle, icon and trend.

use leptos::*;

use crate::format::format_number;

/// Change versus the previous period
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trend {
    pub value: f64,
    pub is_positive: bool,
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        if self.is_positive {
            "↑"
        } else {
            "↓"
        }
    }

    /// Magnitude only; the arrow carries the direction
    pub fn magnitude(&self) -> String {
        format!("{}%", format_number(self.value.abs()))
    }
}

/// Metric card component
#[component]
pub fn MetricsCard(
    /// Card label
    #[prop(into)]
    title: String,
    /// Pre-formatted value
    #[prop(into)]
    value: String,
    #[prop(optional, into)]
    subtitle: Option<String>,
    #[prop(optional)]
    icon: Option<&'static str>,
    #[prop(optional)]
    trend: Option<Trend>,
) -> impl IntoView {
    view! {
        <div class="bg-slate-800 rounded-lg p-6 border border-slate-700">
            <div class="flex items-start justify-between">
                <div class="flex-1">
                    <p class="text-sm font-medium text-slate-400">{title}</p>
                    <p class="mt-2 text-3xl font-bold">{value}</p>
                    {subtitle.map(|s| view! {
                        <p class="mt-1 text-sm text-slate-500">{s}</p>
                    })}
                </div>
                {icon.map(|i| view! {
                    <div class="flex-shrink-0 ml-4 w-12 h-12 bg-sky-900/30 rounded-lg flex items-center justify-center text-2xl">
                        {i}
                    </div>
                })}
            </div>
            {trend.map(|t| {
                let color = if t.is_positive { "text-green-400" } else { "text-red-400" };
                view! {
                    <div class="mt-4 flex items-center">
                        <span class=format!("text-sm font-medium {}", color)>
                            {t.arrow()}
                            " "
                            {t.magnitude()}
                        </span>
                        <span class="text-sm text-slate-500 ml-2">"vs last period"</span>
                    </div>
                }
            })}
        </div>
    }
}
