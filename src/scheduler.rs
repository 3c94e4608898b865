// SPDX-License-Identifier: PMPL-1.0-or-later
//! The periodic monitoring loop.
//!
//! Ticks on a fixed wall-clock interval after a short startup kick.
//! `MissedTickBehavior::Skip` is the re-entrancy guard: a tick whose
//! sequential scans outlive the interval delays the next tick instead
//! of overlapping it, so monitor state is only ever mutated from one
//! tick at a time.

use crate::config::SchedulerConfig;
use crate::engine::Engine;
use chrono::Utc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::info;

/// Run the monitoring loop forever.
pub async fn run(engine: &mut Engine, config: &SchedulerConfig) {
    let startup_delay = Duration::from_secs(config.startup_delay_secs);
    let tick_interval = Duration::from_secs(config.tick_interval_secs.max(1));

    info!(
        startup_delay_secs = config.startup_delay_secs,
        tick_interval_secs = config.tick_interval_secs,
        "monitor scheduler starting"
    );
    tokio::time::sleep(startup_delay).await;

    let mut interval = tokio::time::interval(tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        let summary = engine.tick(Utc::now()).await;
        if summary.scanned > 0 || summary.failed > 0 {
            info!(
                scanned = summary.scanned,
                failed = summary.failed,
                "monitor tick complete"
            );
        }
    }
}
