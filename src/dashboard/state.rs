//! Dashboard state
//!
//! The three-state view model published by the controller.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::time::Duration;

use crate::api::{AnalyticsData, PredictionTimeline, UserAnalytics};
use crate::config::DashboardConfig;

/// The only message a failed refresh ever shows
pub const FETCH_ERROR_MESSAGE: &str =
    "Failed to load dashboard data. Please check if the backend is running.";

/// What the dashboard currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    /// Initial fetch (or a retry after an error) in flight
    Loading,
    /// Last refresh succeeded
    Ready(DashboardSnapshot),
    /// Last refresh failed; no data is kept alongside the message
    Error(String),
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DashboardState::Loading)
    }

    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        match self {
            DashboardState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DashboardState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Everything one successful refresh cycle returned
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub analytics: AnalyticsData,
    pub users: Vec<UserAnalytics>,
    pub timeline: Vec<PredictionTimeline>,
    /// When the refresh completed (local clock)
    pub updated_at: DateTime<Local>,
}

/// Refresh cadence and request sizes
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    pub refresh_interval: Duration,
    /// Users requested per cycle
    pub user_limit: u32,
    /// Trailing days of timeline requested per cycle
    pub timeline_days: u32,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(30),
            user_limit: 50,
            timeline_days: 30,
        }
    }
}

impl From<&DashboardConfig> for DashboardSettings {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            // A zero period would make the ticker panic
            refresh_interval: Duration::from_secs(config.refresh_interval_secs.max(1)),
            user_limit: config.user_limit,
            timeline_days: config.timeline_days,
        }
    }
}
