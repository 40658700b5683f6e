//! Dashboard data source
//!
//! The three read operations one refresh cycle needs, plus the joint
//! fetch that turns them into a snapshot.

use async_trait::async_trait;
use chrono::Local;

use super::state::{DashboardSettings, DashboardSnapshot};
use crate::api::{AnalyticsData, ApiClient, ApiError, PredictionTimeline, UserAnalytics};

/// Read side of the analytics backend used by the dashboard
#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn analytics(&self) -> Result<AnalyticsData, ApiError>;

    async fn user_analytics(&self, limit: u32) -> Result<Vec<UserAnalytics>, ApiError>;

    async fn prediction_timeline(&self, days: u32) -> Result<Vec<PredictionTimeline>, ApiError>;
}

#[async_trait]
impl DashboardSource for ApiClient {
    async fn analytics(&self) -> Result<AnalyticsData, ApiError> {
        self.get_analytics().await
    }

    async fn user_analytics(&self, limit: u32) -> Result<Vec<UserAnalytics>, ApiError> {
        self.get_user_analytics(limit).await
    }

    async fn prediction_timeline(&self, days: u32) -> Result<Vec<PredictionTimeline>, ApiError> {
        self.get_prediction_timeline(days).await
    }
}

/// Issue the three reads together; any failure fails the whole cycle
pub async fn fetch_snapshot(
    source: &dyn DashboardSource,
    settings: &DashboardSettings,
) -> Result<DashboardSnapshot, ApiError> {
    let (analytics, users, timeline) = tokio::try_join!(
        source.analytics(),
        source.user_analytics(settings.user_limit),
        source.prediction_timeline(settings.timeline_days),
    )?;

    Ok(DashboardSnapshot {
        analytics,
        users,
        timeline,
        updated_at: Local::now(),
    })
}
