//! Churnwatch Dashboard
//!
//! Live churn-prediction dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Overview cards for users, churn rate, average churn probability and model accuracy
//! - Daily churn probability chart
//! - Per-user risk table
//! - Polling every 30 seconds plus manual refresh
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the analytics backend over HTTP only.

use leptos::*;

mod api;
mod app;
mod components;
mod format;
mod pages;
mod types;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
