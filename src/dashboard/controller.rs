//! Dashboard Controller
//!
//! Owns the dashboard state machine: fetch on mount, poll on an interval,
//! refresh on demand, stop on unmount.
//!
//! Refreshes are never de-duplicated. Timer and manual refreshes run
//! independently and whichever resolves last decides what is shown.
//!
//! Every mount gets a new generation number. A later mount supersedes an
//! earlier one, and only the handle of the current generation can unmount.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use super::source::{fetch_snapshot, DashboardSource};
use super::state::{DashboardSettings, DashboardState, FETCH_ERROR_MESSAGE};

/// Drives refresh cycles and publishes the resulting state
#[derive(Clone)]
pub struct DashboardController {
    inner: Arc<Inner>,
}

struct Inner {
    source: Arc<dyn DashboardSource>,
    settings: DashboardSettings,
    state: watch::Sender<DashboardState>,
    /// Last generation handed out by `mount`
    generation: AtomicU64,
    /// Generation currently mounted, 0 when unmounted
    active: AtomicU64,
}

impl DashboardController {
    /// Create an unmounted controller in the `Loading` state
    pub fn new(source: Arc<dyn DashboardSource>, settings: DashboardSettings) -> Self {
        let (state, _) = watch::channel(DashboardState::Loading);

        Self {
            inner: Arc::new(Inner {
                source,
                settings,
                state,
                generation: AtomicU64::new(0),
                active: AtomicU64::new(0),
            }),
        }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.inner.settings
    }

    /// Receive every state the controller publishes
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.inner.state.subscribe()
    }

    /// Current state (cloned)
    pub fn state(&self) -> DashboardState {
        self.inner.state.borrow().clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.active_generation().is_some()
    }

    fn active_generation(&self) -> Option<u64> {
        match self.inner.active.load(Ordering::SeqCst) {
            0 => None,
            generation => Some(generation),
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.inner.active.load(Ordering::SeqCst) == generation
    }

    /// Start polling
    ///
    /// Enters `Loading`, refreshes immediately, then every
    /// `refresh_interval` until the returned handle is unmounted or dropped.
    /// Each tick spawns its own refresh, so a slow cycle never delays the
    /// next one. Mounting again stops the previous poller and discards its
    /// in-flight results.
    pub fn mount(&self) -> PollHandle {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let previous = self.inner.active.swap(generation, Ordering::SeqCst);
        self.inner.state.send_replace(DashboardState::Loading);

        let interval = self.inner.settings.refresh_interval;
        if previous != 0 {
            tracing::debug!(previous, generation, "Remounting dashboard");
        }
        tracing::info!(
            generation,
            interval_secs = interval.as_secs(),
            user_limit = self.inner.settings.user_limit,
            timeline_days = self.inner.settings.timeline_days,
            "Dashboard mounted"
        );

        let controller = self.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if !controller.is_current(generation) {
                    break;
                }

                let cycle = controller.clone();
                tokio::spawn(async move {
                    cycle.run_cycle(generation).await;
                });
            }
        });

        PollHandle {
            controller: self.clone(),
            generation,
            task,
        }
    }

    /// Run one refresh cycle
    ///
    /// Used by the timer and by manual Refresh/Retry alike. From `Error` the
    /// view goes back to `Loading`; from `Ready` the current snapshot stays
    /// visible until this cycle resolves. Results arriving after unmount are
    /// dropped.
    pub async fn refresh(&self) {
        match self.active_generation() {
            Some(generation) => self.run_cycle(generation).await,
            None => tracing::debug!("Ignoring refresh on unmounted dashboard"),
        }
    }

    async fn run_cycle(&self, generation: u64) {
        if !self.is_current(generation) {
            return;
        }

        let refresh_id = Uuid::new_v4();
        let started = Instant::now();

        self.inner.state.send_if_modified(|state| {
            if matches!(state, DashboardState::Error(_)) {
                *state = DashboardState::Loading;
                true
            } else {
                false
            }
        });

        tracing::debug!(%refresh_id, "Refreshing dashboard");
        let result = fetch_snapshot(self.inner.source.as_ref(), &self.inner.settings).await;

        if !self.is_current(generation) {
            tracing::debug!(%refresh_id, generation, "Discarding refresh result from a stale mount");
            return;
        }

        let next = match result {
            Ok(snapshot) => {
                if !snapshot.analytics.is_consistent() {
                    tracing::warn!(
                        %refresh_id,
                        total = snapshot.analytics.total_users,
                        active = snapshot.analytics.active_users,
                        churned = snapshot.analytics.churned_users,
                        "Backend returned inconsistent user counts"
                    );
                }

                tracing::info!(
                    %refresh_id,
                    users = snapshot.users.len(),
                    timeline_points = snapshot.timeline.len(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    "Dashboard refreshed"
                );
                DashboardState::Ready(snapshot)
            }
            Err(e) => {
                tracing::error!(%refresh_id, error = %e, "Error fetching dashboard data");
                DashboardState::Error(FETCH_ERROR_MESSAGE.to_string())
            }
        };

        self.inner.state.send_replace(next);
    }

    /// No-op unless `generation` is still the mounted one
    fn unmount(&self, generation: u64) {
        let unmounted = self
            .inner
            .active
            .compare_exchange(generation, 0, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok();
        if unmounted {
            tracing::info!(generation, "Dashboard unmounted");
        }
    }
}

/// Keeps the polling task alive; dropping it unmounts the dashboard
pub struct PollHandle {
    controller: DashboardController,
    generation: u64,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn controller(&self) -> &DashboardController {
        &self.controller
    }

    /// Stop polling and ignore any refresh still in flight
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.controller.unmount(self.generation);
        self.task.abort();
    }
}
