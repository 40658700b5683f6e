//! # Churnwatch
//!
//! Live churn-prediction dashboard client for the ML analytics backend.
//!
//! ## Features
//!
//! - **Typed API client**: analytics, per-user risk, prediction timeline,
//!   single and batch predictions, health
//! - **Polling controller**: fetch on mount, refresh every 30 seconds,
//!   manual refresh/retry, loading/ready/error states
//! - **Terminal view**: metric cards, churn probability chart, user risk table
//!
//! ## Modules
//!
//! - [`api`]: REST client and wire types
//! - [`dashboard`]: refresh state machine
//! - [`render`]: stateless text renderers
//! - [`risk`]: churn risk classification
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use churnwatch::{ApiClient, DashboardController, DashboardSettings};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new("http://localhost:8000")?;
//!     let controller = DashboardController::new(Arc::new(client), DashboardSettings::default());
//!
//!     // Fetch now, then every 30 seconds until the handle is dropped
//!     let handle = controller.mount();
//!
//!     let mut states = controller.subscribe();
//!     states.changed().await?;
//!     println!("{:?}", *states.borrow());
//!
//!     handle.unmount();
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod render;
pub mod risk;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{
    AnalyticsData, ApiClient, ApiError, HealthStatus, Prediction, PredictionTimeline,
    UserAnalytics,
};

pub use dashboard::{
    fetch_snapshot, DashboardController, DashboardSettings, DashboardSnapshot, DashboardSource,
    DashboardState, PollHandle, FETCH_ERROR_MESSAGE,
};

pub use config::{
    generate_default_config, Config, ConfigError, ConfigWarning, DashboardConfig, LoggingConfig,
};

pub use risk::RiskLevel;
