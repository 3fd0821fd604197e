// ABOUTME: Periodic expiry sweep driven by a tokio interval
// ABOUTME: Each tick runs the external-config check and then the notification sweep
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use crate::errors::AppResult;
use crate::resources::ServerResources;
use crate::services::SweepReport;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Background task running the expiry sweep every `interval`
///
/// The first sweep happens one interval after start. The task stops when the
/// scheduler is dropped.
pub struct ExpiryScheduler {
    shutdown_tx: mpsc::Sender<()>,
}

impl ExpiryScheduler {
    /// Spawn the sweep task
    #[must_use]
    pub fn start(resources: Arc<ServerResources>, interval: Duration) -> Self {
        let interval = interval.max(Duration::from_secs(1));
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(interval_secs = interval.as_secs(), "Expiry scheduler started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match run_once(&resources).await {
                            Ok(report) => debug!(?report, "Scheduled sweep complete"),
                            Err(e) => warn!(error = %e, "Scheduled sweep failed"),
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        debug!("Expiry scheduler received shutdown signal");
                        break;
                    }
                }
            }
        });

        Self { shutdown_tx }
    }
}

impl Drop for ExpiryScheduler {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown_tx.try_send(()) {
            debug!(error = ?e, "Scheduler shutdown signal send failed (task already stopped)");
        }
    }
}

/// One scheduled pass: external-config check, then the sweep
///
/// # Errors
///
/// Returns an error if no store is bound or a store operation fails
pub async fn run_once(resources: &ServerResources) -> AppResult<SweepReport> {
    let now = Utc::now();
    let check = resources.external_monitor()?.check(now).await?;
    if check.removal.any() {
        info!(removal = ?check.removal, "Cleared settings for removed external credentials");
    }
    resources
        .notification_service()?
        .check_and_notify(now)
        .await
}
