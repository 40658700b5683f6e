//! Analytics REST API Client
//!
//! HTTP client for the churn analytics backend. Each method issues exactly
//! one request: no retries, no caching, no timeout override.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{
    AnalyticsData, HealthStatus, Prediction, PredictionRequest, PredictionTimeline, UserAnalytics,
};

/// Default backend location
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default number of users requested by `get_user_analytics`
pub const DEFAULT_USER_LIMIT: u32 = 100;

/// Default trailing window requested by `get_prediction_timeline`
pub const DEFAULT_TIMELINE_DAYS: u32 = 30;

const ANALYTICS_PATH: &str = "/api/analytics/";
const USER_ANALYTICS_PATH: &str = "/api/analytics/users";
const TIMELINE_PATH: &str = "/api/analytics/predictions/timeline";
const PREDICT_PATH: &str = "/api/predictions/";
const BATCH_PREDICT_PATH: &str = "/api/predictions/batch";
const HEALTH_PATH: &str = "/health";

/// Analytics backend client
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the backend at `base_url`
    ///
    /// Trailing slashes are trimmed so endpoint paths can be appended verbatim.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url.as_ref())?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self { client, base_url })
    }

    /// Backend base URL (normalized, without trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /api/analytics/
    pub async fn get_analytics(&self) -> Result<AnalyticsData, ApiError> {
        self.get_json(ANALYTICS_PATH, &[]).await
    }

    /// GET /api/analytics/users?limit=N
    ///
    /// The backend truncates the list to `limit` entries.
    pub async fn get_user_analytics(&self, limit: u32) -> Result<Vec<UserAnalytics>, ApiError> {
        self.get_json(USER_ANALYTICS_PATH, &[("limit", limit)]).await
    }

    /// GET /api/analytics/predictions/timeline?days=N
    pub async fn get_prediction_timeline(
        &self,
        days: u32,
    ) -> Result<Vec<PredictionTimeline>, ApiError> {
        self.get_json(TIMELINE_PATH, &[("days", days)]).await
    }

    /// POST /api/predictions/
    ///
    /// Asks the backend to score one user with the active model.
    pub async fn predict_churn(&self, user_id: i64) -> Result<Prediction, ApiError> {
        let url = self.url(PREDICT_PATH);
        tracing::debug!(%url, user_id, "Requesting churn prediction");

        let response = self
            .client
            .post(&url)
            .json(&PredictionRequest { user_id })
            .send()
            .await?;

        decode(PREDICT_PATH, response).await
    }

    /// POST /api/predictions/batch
    ///
    /// Results come back in the same order as `user_ids`.
    pub async fn batch_predict(&self, user_ids: &[i64]) -> Result<Vec<Prediction>, ApiError> {
        let url = self.url(BATCH_PREDICT_PATH);
        tracing::debug!(%url, count = user_ids.len(), "Requesting batch prediction");

        let response = self.client.post(&url).json(user_ids).send().await?;

        decode(BATCH_PREDICT_PATH, response).await
    }

    /// GET /health
    pub async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        self.get_json(HEALTH_PATH, &[]).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, u32)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, ?query, "GET");

        let response = self.client.get(&url).query(query).send().await?;

        decode(path, response).await
    }
}

/// Read the body as text, then decode it so shape errors stay distinguishable
async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');

    let parsed = Url::parse(trimmed).map_err(|e| ApiError::InvalidBaseUrl(format!("{raw}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::InvalidBaseUrl(format!(
            "{raw}: unsupported scheme {}",
            parsed.scheme()
        )));
    }

    Ok(trimmed.to_string())
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when talking to the analytics backend
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network unreachable, connection reset, body read failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    /// Backend answered 2xx with an unexpected payload shape
    #[error("Unexpected payload from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid API base URL {0}")]
    InvalidBaseUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Query,
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn user_json(id: i64) -> Value {
        json!({
            "user_id": id,
            "email": format!("user{}@example.com", id),
            "subscription_tier": "free",
            "churned": false,
            "days_since_last_active": 2.0,
            "total_events": 10,
            "active_days": 3,
            "avg_session_duration": 120.5,
            "latest_churn_prediction": 0.25
        })
    }

    fn test_backend() -> Router {
        Router::new()
            .route(
                "/api/analytics/",
                get(|| async {
                    Json(json!({
                        "total_users": 100,
                        "active_users": 80,
                        "churned_users": 20,
                        "churn_rate": 20.0,
                        "avg_churn_probability": 0.3,
                        "model_version": "v1.0.0",
                        "model_accuracy": 0.91,
                        "total_predictions": 512
                    }))
                }),
            )
            .route(
                "/api/analytics/users",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    let limit: i64 = params["limit"].parse().unwrap();
                    Json(Value::Array((1..=limit).map(user_json).collect()))
                }),
            )
            .route(
                "/api/analytics/predictions/timeline",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    let days: u64 = params["days"].parse().unwrap();
                    Json(json!([{
                        "date": "2024-03-01",
                        "avg_churn_probability": 0.4,
                        "prediction_count": days
                    }]))
                }),
            )
            .route(
                "/api/predictions/",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({
                        "user_id": body["user_id"],
                        "prediction": 0.8,
                        "confidence": 0.6,
                        "model_version": "v1.0.0"
                    }))
                }),
            )
            .route(
                "/api/predictions/batch",
                post(|Json(ids): Json<Vec<i64>>| async move {
                    let results: Vec<Value> = ids
                        .iter()
                        .map(|id| {
                            json!({
                                "user_id": id,
                                "prediction": 0.1,
                                "confidence": 0.9,
                                "model_version": "v1.0.0",
                                "created_at": "2024-03-01T00:00:00Z"
                            })
                        })
                        .collect();
                    Json(Value::Array(results))
                }),
            )
            .route(
                "/health",
                get(|| async {
                    Json(json!({
                        "status": "healthy",
                        "model_version": "v1.0.0",
                        "environment": "development"
                    }))
                }),
            )
    }

    #[test]
    fn test_base_url_normalized() {
        let client = ApiClient::new("http://localhost:8000///").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.url(ANALYTICS_PATH),
            "http://localhost:8000/api/analytics/"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            ApiClient::new("ftp://localhost"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_get_analytics() {
        let base = spawn_backend(test_backend()).await;
        let client = ApiClient::new(&base).unwrap();

        let analytics = client.get_analytics().await.unwrap();
        assert_eq!(analytics.total_users, 100);
        assert_eq!(analytics.model_accuracy, Some(0.91));
        assert!(analytics.is_consistent());
    }

    #[tokio::test]
    async fn test_user_limit_forwarded() {
        let base = spawn_backend(test_backend()).await;
        let client = ApiClient::new(&base).unwrap();

        let users = client.get_user_analytics(5).await.unwrap();
        assert_eq!(users.len(), 5);
        assert_eq!(users[0].user_id, 1);
        assert_eq!(users[4].email, "user5@example.com");
    }

    #[tokio::test]
    async fn test_timeline_days_forwarded() {
        let base = spawn_backend(test_backend()).await;
        let client = ApiClient::new(&base).unwrap();

        let timeline = client.get_prediction_timeline(DEFAULT_TIMELINE_DAYS).await.unwrap();
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].prediction_count, 30);
    }

    #[tokio::test]
    async fn test_predict_churn_posts_user_id() {
        let base = spawn_backend(test_backend()).await;
        let client = ApiClient::new(&base).unwrap();

        let prediction = client.predict_churn(42).await.unwrap();
        assert_eq!(prediction.user_id, 42);
        assert!(prediction.created_at.is_none());
    }

    #[tokio::test]
    async fn test_batch_predict_keeps_order() {
        let base = spawn_backend(test_backend()).await;
        let client = ApiClient::new(&base).unwrap();

        let predictions = client.batch_predict(&[9, 3, 7]).await.unwrap();
        let ids: Vec<i64> = predictions.iter().map(|p| p.user_id).collect();
        assert_eq!(ids, vec![9, 3, 7]);
        assert!(predictions.iter().all(|p| p.created_at.is_some()));
    }

    #[tokio::test]
    async fn test_health_check() {
        let base = spawn_backend(test_backend()).await;
        let client = ApiClient::new(&base).unwrap();

        let health = client.health_check().await.unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.environment.as_deref(), Some("development"));
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let router = Router::new().route(
            "/api/analytics/",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model offline") }),
        );
        let base = spawn_backend(router).await;
        let client = ApiClient::new(&base).unwrap();

        match client.get_analytics().await {
            Err(ApiError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "model offline");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_payload() {
        let router = Router::new().route(
            "/api/analytics/",
            get(|| async { Json(json!({ "total_users": "lots" })) }),
        );
        let base = spawn_backend(router).await;
        let client = ApiClient::new(&base).unwrap();

        match client.get_analytics().await {
            Err(ApiError::Decode { endpoint, .. }) => assert_eq!(endpoint, ANALYTICS_PATH),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(format!("http://{}", addr)).unwrap();
        assert!(matches!(
            client.health_check().await,
            Err(ApiError::Transport(_))
        ));
    }
}
