//! Backend Data Model
//!
//! Records returned by the analytics API, decoded from snake_case JSON.

/// Aggregate snapshot of the user base and the deployed model
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct AnalyticsData {
    pub total_users: u64,
    pub active_users: u64,
    pub churned_users: u64,
    /// Already a percentage (0-100)
    pub churn_rate: f64,
    pub avg_churn_probability: f64,
    pub model_version: String,
    #[serde(default)]
    pub model_accuracy: Option<f64>,
    pub total_predictions: u64,
}

/// Per-user engagement and risk view
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
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
    #[serde(default)]
    pub latest_churn_prediction: Option<f64>,
}

/// One day of aggregated prediction activity
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct PredictionTimeline {
    pub date: String,
    pub avg_churn_probability: f64,
    pub prediction_count: u64,
}

/// Result of a churn prediction request
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct Prediction {
    pub user_id: i64,
    pub prediction: f64,
    pub confidence: f64,
    pub model_version: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Backend liveness probe
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    pub model_version: String,
    #[serde(default)]
    pub environment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_with_nulls_decodes() {
        let json = r#"{
            "user_id": 7,
            "email": "new@example.com",
            "subscription_tier": "free",
            "churned": false,
            "days_since_last_active": null,
            "total_events": 0,
            "active_days": 0,
            "avg_session_duration": null,
            "latest_churn_prediction": null
        }"#;

        let user: UserAnalytics = serde_json::from_str(json).unwrap();
        assert_eq!(user.user_id, 7);
        assert!(user.days_since_last_active.is_none());
        assert!(user.latest_churn_prediction.is_none());
    }

    #[test]
    fn test_analytics_without_accuracy_decodes() {
        let json = r#"{
            "total_users": 10,
            "active_users": 8,
            "churned_users": 2,
            "churn_rate": 20.0,
            "avg_churn_probability": 0.31,
            "model_version": "v2",
            "total_predictions": 40
        }"#;

        let analytics: AnalyticsData = serde_json::from_str(json).unwrap();
        assert_eq!(analytics.model_accuracy, None);
        assert_eq!(analytics.total_predictions, 40);
    }
}
