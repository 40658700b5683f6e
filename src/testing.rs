//! Shared test fixtures

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::api::{AnalyticsData, ApiError, PredictionTimeline, UserAnalytics};
use crate::dashboard::DashboardSource;

pub fn sample_analytics() -> AnalyticsData {
    AnalyticsData {
        total_users: 12_480,
        active_users: 10_112,
        churned_users: 2_368,
        churn_rate: 18.97,
        avg_churn_probability: 0.2734,
        model_version: "v1.4.2".to_string(),
        model_accuracy: Some(0.912),
        total_predictions: 48_213,
    }
}

pub fn sample_user(user_id: i64, prediction: Option<f64>) -> UserAnalytics {
    UserAnalytics {
        user_id,
        email: format!("user{}@example.com", user_id),
        subscription_tier: "premium".to_string(),
        churned: false,
        days_since_last_active: Some(3.4),
        total_events: 87,
        active_days: 21,
        avg_session_duration: Some(312.0),
        latest_churn_prediction: prediction,
    }
}

pub fn sample_timeline(days: usize) -> Vec<PredictionTimeline> {
    (0..days)
        .map(|i| PredictionTimeline {
            date: format!("2024-03-{:02}", i + 1),
            avg_churn_probability: 0.2 + (i % 5) as f64 * 0.1,
            prediction_count: 40 + i as u64,
        })
        .collect()
}

fn backend_down() -> ApiError {
    ApiError::Status {
        status: 503,
        body: "backend unavailable".to_string(),
    }
}

/// Scripted backend that counts calls and can fail or stall on demand
///
/// Each analytics response carries `model_version = "v{n}"` where `n` is the
/// call number, so tests can tell which cycle produced the visible snapshot.
#[derive(Default)]
pub struct ScriptedSource {
    pub analytics_calls: AtomicUsize,
    pub user_calls: AtomicUsize,
    pub timeline_calls: AtomicUsize,
    pub last_limit: AtomicU32,
    pub last_days: AtomicU32,
    pub fail_analytics: AtomicBool,
    pub fail_timeline: AtomicBool,
    /// Delays applied to successive analytics calls (front first)
    pub analytics_delays: Mutex<VecDeque<Duration>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let source = Self::default();
        source.fail_analytics.store(true, Ordering::SeqCst);
        source
    }

    pub fn push_delay(&self, delay: Duration) {
        self.analytics_delays.lock().unwrap().push_back(delay);
    }

    /// (analytics, users, timeline) call counts
    pub fn calls(&self) -> (usize, usize, usize) {
        (
            self.analytics_calls.load(Ordering::SeqCst),
            self.user_calls.load(Ordering::SeqCst),
            self.timeline_calls.load(Ordering::SeqCst),
        )
    }
}

#[async_trait]
impl DashboardSource for ScriptedSource {
    async fn analytics(&self) -> Result<AnalyticsData, ApiError> {
        let call = self.analytics_calls.fetch_add(1, Ordering::SeqCst) + 1;
        let delay = self.analytics_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_analytics.load(Ordering::SeqCst) {
            return Err(backend_down());
        }

        Ok(AnalyticsData {
            model_version: format!("v{}", call),
            ..sample_analytics()
        })
    }

    async fn user_analytics(&self, limit: u32) -> Result<Vec<UserAnalytics>, ApiError> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        self.last_limit.store(limit, Ordering::SeqCst);

        Ok((1..=limit as i64)
            .map(|id| sample_user(id, Some(id as f64 / limit as f64)))
            .collect())
    }

    async fn prediction_timeline(&self, days: u32) -> Result<Vec<PredictionTimeline>, ApiError> {
        self.timeline_calls.fetch_add(1, Ordering::SeqCst);
        self.last_days.store(days, Ordering::SeqCst);

        if self.fail_timeline.load(Ordering::SeqCst) {
            return Err(backend_down());
        }

        Ok(sample_timeline(days as usize))
    }
}
