//! Analytics API
//!
//! HTTP access to the churn analytics backend. The dashboard reads the
//! analytics endpoints; prediction and health calls complete the client.

pub mod client;

pub use client::*;
