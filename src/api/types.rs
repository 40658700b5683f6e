//! Analytics API Types
//!
//! Read-only records returned by the analytics backend.
//! These types are deserialized from the backend's snake_case JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// ANALYTICS
// ============================================

/// Aggregate snapshot of the user base and the deployed model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsData {
    pub total_users: u64,
    pub active_users: u64,
    pub churned_users: u64,
    /// Percentage of churned users (0-100)
    pub churn_rate: f64,
    /// Mean churn probability across all predictions (0-1)
    pub avg_churn_probability: f64,
    pub model_version: String,
    /// Accuracy of the deployed model (0-1), absent before evaluation
    #[serde(default)]
    pub model_accuracy: Option<f64>,
    pub total_predictions: u64,
}

impl AnalyticsData {
    /// Whether the user counts are mutually consistent
    ///
    /// Neither the churned nor the active count may exceed the total.
    pub fn is_consistent(&self) -> bool {
        self.churned_users <= self.total_users && self.active_users <= self.total_users
    }
}

/// Per-user engagement and risk view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAnalytics {
    pub user_id: i64,
    pub email: String,
    pub subscription_tier: String,
    pub churned: bool,
    #[serde(default)]
    pub days_since_last_active: Option<f64>,
    pub total_events: u64,
    pub active_days: u64,
    #[serde(default)]
    pub avg_session_duration: Option<f64>,
    /// Latest churn probability (0-1), `None` until the user has been scored
    #[serde(default)]
    pub latest_churn_prediction: Option<f64>,
}

/// One day of aggregated prediction activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionTimeline {
    /// Calendar date as reported by the backend (YYYY-MM-DD)
    pub date: String,
    pub avg_churn_probability: f64,
    pub prediction_count: u64,
}

// ============================================
// PREDICTIONS
// ============================================

/// Result of a churn prediction request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub user_id: i64,
    /// Churn probability (0-1)
    pub prediction: f64,
    /// Model confidence (0-1)
    pub confidence: f64,
    pub model_version: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Single prediction request body
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PredictionRequest {
    pub user_id: i64,
}

// ============================================
// HEALTH
// ============================================

/// Liveness and model version probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model_version: String,
    #[serde(default)]
    pub environment: Option<String>,
}
