//! App Root Component
//!
//! Static page shell around the dashboard.

use leptos::*;

use crate::api;
use crate::pages::Dashboard;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-slate-900 text-white flex flex-col">
            <Header />

            <main class="flex-1 w-full max-w-7xl mx-auto px-4 py-8">
                <Dashboard />
            </main>

            <Footer />
        </div>
    }
}

#[component]
fn Header() -> impl IntoView {
    view! {
        <header class="bg-slate-800 border-b border-slate-700 shadow-lg">
            <div class="max-w-7xl mx-auto px-4 py-6 flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"ML Analytics Dashboard"</h1>
                    <p class="text-slate-400 mt-1">"Real-time churn prediction"</p>
                </div>

                // Always on; the dashboard itself reports fetch failures
                <div class="flex items-center space-x-2">
                    <span class="w-3 h-3 bg-green-500 rounded-full animate-pulse" />
                    <span class="text-sm text-slate-400">"Live"</span>
                </div>
            </div>
        </header>
    }
}

#[component]
fn Footer() -> impl IntoView {
    let backend = api::get_api_base();

    view! {
        <footer class="bg-slate-800 border-t border-slate-700 mt-12">
            <div class="max-w-7xl mx-auto px-4 py-6 text-center text-sm text-slate-400">
                {format!("churnwatch-ui v{} · backend {}", env!("CARGO_PKG_VERSION"), backend)}
            </div>
        </footer>
    }
}
