//! Loading Component

use leptos::*;

/// Centered spinner with the dashboard loading caption
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center h-64">
            <div class="text-center">
                <div class="inline-block loading-spinner w-12 h-12" />
                <p class="mt-4 text-slate-400">"Loading dashboard..."</p>
            </div>
        </div>
    }
}
