//! Dashboard Controller
//!
//! Fetch-on-mount, periodic refresh and the loading/ready/error state
//! machine behind the dashboard view.
//!
//! ## Data Flow
//!
//! 1. `mount()` enters `Loading` and starts the polling task
//! 2. Every tick (and every manual refresh) issues three concurrent reads
//! 3. All three succeed: the previous snapshot is replaced wholesale
//! 4. Any one fails: the view drops to `Error` with a fixed message
//! 5. Dropping the `PollHandle` stops polling

mod controller;
mod source;
mod state;

pub use controller::{DashboardController, PollHandle};
pub use source::{fetch_snapshot, DashboardSource};
pub use state::{DashboardSettings, DashboardSnapshot, DashboardState, FETCH_ERROR_MESSAGE};
