//! Shared server state
//!
//! One dashboard session shared by every request. Handlers lock it briefly;
//! research fetches run with the lock released.

use std::sync::Arc;
use std::time::{Duration, Instant};

use alpha_research::{Dashboard, ProfileSource};
use tokio::sync::Mutex;

/// State handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Mutex<Dashboard>>,
    /// Research service consulted by searches
    pub source: Arc<dyn ProfileSource>,
    /// Header polling interval written into the page
    pub poll_interval: Duration,
    started_at: Instant,
}

impl AppState {
    pub fn new(dashboard: Dashboard, source: Arc<dyn ProfileSource>) -> Self {
        let poll_interval = dashboard.config().jitter_interval;
        Self {
            dashboard: Arc::new(Mutex::new(dashboard)),
            source,
            poll_interval,
            started_at: Instant::now(),
        }
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Polling interval in milliseconds, as the page script expects
    pub fn poll_ms(&self) -> u64 {
        u64::try_from(self.poll_interval.as_millis()).unwrap_or(u64::MAX)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("poll_interval", &self.poll_interval)
            .field("uptime_secs", &self.uptime_secs())
            .finish_non_exhaustive()
    }
}
