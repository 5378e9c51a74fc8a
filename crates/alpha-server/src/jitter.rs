//! Background task driving the live-price drift

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

use crate::state::AppState;

/// Tick the dashboard's jitter every `interval` until the task is aborted
pub fn spawn_jitter(state: AppState, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // the first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if state.dashboard.lock().await.tick_jitter().is_none() {
                debug!("no price on the page, skipping jitter tick");
            }
        }
    })
}
