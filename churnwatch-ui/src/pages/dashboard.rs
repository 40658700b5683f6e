//! Dashboard Page
//!
//! Owns the dashboard data: fetches on mount, refreshes every 30 seconds
//! and on demand, and picks the loading, error or overview view.

use chrono::{DateTime, Local};
use futures_util::future::try_join3;
use gloo_timers::callback::Interval;
use leptos::*;
use std::cell::Cell;
use std::rc::Rc;

use crate::api;
use crate::components::{Loading, MetricsCard, PredictionChart, UserTable};
use crate::format::{accuracy_label, format_count, format_fraction, format_number};
use crate::types::{AnalyticsData, PredictionTimeline, UserAnalytics};

/// The only message a failed refresh ever shows
pub const FETCH_ERROR_MESSAGE: &str =
    "Failed to load dashboard data. Please check if the backend is running.";

const USER_LIMIT: u32 = 50;
const TIMELINE_DAYS: u32 = 30;
const REFRESH_INTERVAL_MS: u32 = 30_000;

type FetchResult = (AnalyticsData, Vec<UserAnalytics>, Vec<PredictionTimeline>);

/// Reactive dashboard state plus the mounted guard for late responses
#[derive(Clone)]
struct DashboardData {
    analytics: RwSignal<Option<AnalyticsData>>,
    users: RwSignal<Vec<UserAnalytics>>,
    timeline: RwSignal<Vec<PredictionTimeline>>,
    loading: RwSignal<bool>,
    error: RwSignal<Option<String>>,
    last_updated: RwSignal<Option<DateTime<Local>>>,
    mounted: Rc<Cell<bool>>,
}

impl DashboardData {
    fn new() -> Self {
        Self {
            analytics: create_rw_signal(None),
            users: create_rw_signal(Vec::new()),
            timeline: create_rw_signal(Vec::new()),
            loading: create_rw_signal(true),
            error: create_rw_signal(None),
            last_updated: create_rw_signal(None),
            mounted: Rc::new(Cell::new(true)),
        }
    }

    /// Fetch all three datasets and apply them together
    ///
    /// Timer ticks and button clicks both land here; overlapping calls are
    /// not merged, so whichever response arrives last is what shows.
    fn refresh(&self) {
        if !self.begin_refresh() {
            return;
        }

        let this = self.clone();
        spawn_local(async move {
            let result = try_join3(
                api::get_analytics(),
                api::get_user_analytics(USER_LIMIT),
                api::get_prediction_timeline(TIMELINE_DAYS),
            )
            .await;

            this.settle(result);
        });
    }

    /// `false` once unmounted; retrying from the error view goes back
    /// through the spinner
    fn begin_refresh(&self) -> bool {
        if !self.mounted.get() {
            return false;
        }

        if self.error.with_untracked(Option::is_some) {
            batch(|| {
                self.error.set(None);
                self.loading.set(true);
            });
        }
        true
    }

    /// Apply a finished fetch unless the page has been unmounted meanwhile
    fn settle(&self, result: Result<FetchResult, String>) {
        if !self.mounted.get() {
            return;
        }

        match result {
            Ok((analytics, users, timeline)) => self.apply(analytics, users, timeline),
            Err(e) => {
                leptos::logging::error!("Error fetching dashboard data: {}", e);
                self.fail();
            }
        }
    }

    fn apply(
        &self,
        analytics: AnalyticsData,
        users: Vec<UserAnalytics>,
        timeline: Vec<PredictionTimeline>,
    ) {
        if analytics.churned_users > analytics.total_users
            || analytics.active_users > analytics.total_users
        {
            leptos::logging::warn!(
                "Inconsistent user counts: total={} active={} churned={}",
                analytics.total_users, analytics.active_users, analytics.churned_users
            );
        }

        batch(|| {
            self.analytics.set(Some(analytics));
            self.users.set(users);
            self.timeline.set(timeline);
            self.last_updated.set(Some(Local::now()));
            self.error.set(None);
            self.loading.set(false);
        });
    }

    fn fail(&self) {
        batch(|| {
            self.analytics.set(None);
            self.users.set(Vec::new());
            self.timeline.set(Vec::new());
            self.error.set(Some(FETCH_ERROR_MESSAGE.to_string()));
            self.loading.set(false);
        });
    }
}

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let data = DashboardData::new();
    data.refresh();

    let ticker = data.clone();
    let interval = Interval::new(REFRESH_INTERVAL_MS, move || ticker.refresh());

    let mounted = Rc::clone(&data.mounted);
    on_cleanup(move || {
        mounted.set(false);
        drop(interval);
    });

    move || {
        if data.loading.get() {
            return view! { <Loading /> }.into_view();
        }

        if let Some(message) = data.error.get() {
            let retry = data.clone();
            return view! {
                <div class="bg-red-900/20 border border-red-800 rounded-lg p-6">
                    <h3 class="text-lg font-semibold text-red-400">"Error"</h3>
                    <p class="text-red-300">{message}</p>
                    <button
                        on:click=move |_| retry.refresh()
                        class="mt-4 px-4 py-2 bg-sky-600 hover:bg-sky-700 rounded-lg font-medium transition-colors"
                    >
                        "Retry"
                    </button>
                </div>
            }
            .into_view();
        }

        match data.analytics.get() {
            Some(analytics) => {
                let refresh = data.clone();
                view! {
                    <Overview
                        analytics=analytics
                        users=data.users.get()
                        timeline=data.timeline.get()
                        last_updated=data.last_updated.get()
                        on_refresh=move || refresh.refresh()
                    />
                }
                .into_view()
            }
            None => ().into_view(),
        }
    }
}

#[component]
fn Overview<F>(
    analytics: AnalyticsData,
    users: Vec<UserAnalytics>,
    timeline: Vec<PredictionTimeline>,
    last_updated: Option<DateTime<Local>>,
    on_refresh: F,
) -> impl IntoView
where
    F: Fn() + 'static,
{
    let updated = last_updated
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_default();

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h2 class="text-2xl font-bold">"Overview"</h2>
                    <p class="text-sm text-slate-400 mt-1">{format!("Last updated: {}", updated)}</p>
                </div>
                <button
                    on:click=move |_| on_refresh()
                    class="px-4 py-2 bg-slate-700 hover:bg-slate-600 rounded-lg text-sm font-medium transition-colors"
                >
                    "Refresh"
                </button>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6">
                <MetricsCard
                    title="Total Users"
                    value=format_count(analytics.total_users)
                    subtitle=format!("{} active", analytics.active_users)
                    icon="👥"
                />
                <MetricsCard
                    title="Churn Rate"
                    value=format!("{}%", format_number(analytics.churn_rate))
                    subtitle=format!("{} churned users", analytics.churned_users)
                    icon="📉"
                />
                <MetricsCard
                    title="Avg Churn Probability"
                    value=format_fraction(analytics.avg_churn_probability)
                    subtitle="Across all predictions"
                    icon="📊"
                />
                <MetricsCard
                    title="Model Accuracy"
                    value=accuracy_label(analytics.model_accuracy)
                    subtitle=format!("Version: {}", analytics.model_version)
                    icon="✅"
                />
            </div>

            {(!timeline.is_empty()).then(|| view! { <PredictionChart data=timeline /> })}

            {(!users.is_empty()).then(|| view! { <UserTable users=users /> })}

            <div class="bg-sky-900/20 border border-sky-800 rounded-lg p-6">
                <h3 class="text-lg font-semibold">"Deployed Model"</h3>
                <p class="text-slate-300 mt-1">
                    "Model version "
                    <span class="font-mono text-sky-400">{analytics.model_version.clone()}</span>
                    " deployed."
                </p>
                <p class="text-sm text-slate-400 mt-2">
                    "Total predictions made: "
                    <span class="font-semibold text-white">{format_count(analytics.total_predictions)}</span>
                </p>
            </div>
        </div>
    }
}
