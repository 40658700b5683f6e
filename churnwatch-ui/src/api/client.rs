//! HTTP API Client
//!
//! Functions for communicating with the churn analytics REST API.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::types::{AnalyticsData, HealthStatus, Prediction, PredictionTimeline, UserAnalytics};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Local storage key that overrides the build-time base URL
pub const API_URL_STORAGE_KEY: &str = "churnwatch_api_url";

// The dashboard asks for its own limits and never scores users; the
// defaults and the prediction and health calls round out the client.

/// Users requested when no limit is given
#[allow(dead_code)]
pub const DEFAULT_USER_LIMIT: u32 = 100;

/// Timeline days requested when none are given
#[allow(dead_code)]
pub const DEFAULT_TIMELINE_DAYS: u32 = 30;

/// Get the API base URL: local storage, then `CHURNWATCH_API_URL` at build time, then default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_STORAGE_KEY).ok().flatten());

    resolve_api_base(stored.as_deref(), option_env!("CHURNWATCH_API_URL"))
}

/// Pick the first non-blank candidate and drop trailing slashes
fn resolve_api_base(stored: Option<&str>, build_time: Option<&str>) -> String {
    let url = [stored, build_time]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_BASE);

    url.trim_end_matches('/').to_string()
}

// ============ API Functions ============

/// Fetch the aggregate analytics snapshot
pub async fn get_analytics() -> Result<AnalyticsData, String> {
    get_json(&format!("{}/api/analytics/", get_api_base())).await
}

/// Fetch per-user risk rows, truncated by the backend to `limit`
pub async fn get_user_analytics(limit: u32) -> Result<Vec<UserAnalytics>, String> {
    get_json(&format!("{}/api/analytics/users?limit={}", get_api_base(), limit)).await
}

/// Fetch daily average churn probability for the trailing `days`
pub async fn get_prediction_timeline(days: u32) -> Result<Vec<PredictionTimeline>, String> {
    get_json(&format!(
        "{}/api/analytics/predictions/timeline?days={}",
        get_api_base(),
        days
    ))
    .await
}

/// Score one user with the active model
#[allow(dead_code)]
pub async fn predict_churn(user_id: i64) -> Result<Prediction, String> {
    #[derive(serde::Serialize)]
    struct PredictionRequest {
        user_id: i64,
    }

    let response = Request::post(&format!("{}/api/predictions/", get_api_base()))
        .json(&PredictionRequest { user_id })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    decode(response).await
}

/// Score several users; results come back in input order
#[allow(dead_code)]
pub async fn batch_predict(user_ids: &[i64]) -> Result<Vec<Prediction>, String> {
    let response = Request::post(&format!("{}/api/predictions/batch", get_api_base()))
        .json(&user_ids)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    decode(response).await
}

/// Check API health
#[allow(dead_code)]
pub async fn health_check() -> Result<HealthStatus, String> {
    get_json(&format!("{}/health", get_api_base())).await
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    decode(response).await
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(format!("HTTP {}: {}", status, body));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}
