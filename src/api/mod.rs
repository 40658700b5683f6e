//! Analytics Backend API
//!
//! Typed access to the churn analytics REST API.
//!
//! # Endpoints
//!
//! ## Analytics
//! - `GET /api/analytics/` - Aggregate snapshot
//! - `GET /api/analytics/users?limit=N` - Per-user risk view
//! - `GET /api/analytics/predictions/timeline?days=N` - Daily prediction averages
//!
//! ## Predictions
//! - `POST /api/predictions/` - Score one user
//! - `POST /api/predictions/batch` - Score a list of users
//!
//! ## Health
//! - `GET /health` - Liveness and model version

pub mod client;
pub mod types;

pub use client::{ApiClient, ApiError, DEFAULT_API_URL, DEFAULT_TIMELINE_DAYS, DEFAULT_USER_LIMIT};
pub use types::{AnalyticsData, HealthStatus, Prediction, PredictionTimeline, UserAnalytics};
