//! Tick source: the virtual playback clock

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

use super::service::PlayerService;

pub struct TickSource;

impl TickSource {
    /// Spawn the clock, stepping `service` once per `period`.
    ///
    /// Wall-clock driven and uncompensated: ticks missed while the process
    /// was stalled are skipped, never replayed.
    pub fn spawn(service: Arc<PlayerService>, period: Duration) -> JoinHandle<()> {
        info!("Tick source started, period {:?}", period);
        tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of a tokio interval completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                service.tick().await;
            }
        })
    }
}
