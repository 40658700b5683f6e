//! UI Components
//!
//! Presentation components for the dashboard. They take props and render;
//! none of them fetch.

pub mod loading;
pub mod metrics_card;
pub mod prediction_chart;
pub mod user_table;

pub use loading::Loading;
pub use metrics_card::MetricsCard;
pub use prediction_chart::PredictionChart;
pub use user_table::UserTable;
