//! Periodic background sampling
//!
//! The first tick fires one interval after start. Each tick runs as its own task,
//! so a slow aggregation may overlap the next tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::monitor::Monitor;

/// Default sampling period
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

pub struct Sampler {
    monitor: Arc<Monitor>,
    interval: Duration,
}

impl Sampler {
    pub fn new(monitor: Arc<Monitor>, interval: Duration) -> Self {
        Self { monitor, interval }
    }

    /// Start the sampling loop on the current runtime
    pub fn spawn(self) -> SamplerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let Sampler { monitor, interval } = self;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            tracing::info!("Sampler started, interval {:?}", interval);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let monitor = monitor.clone();
                        tokio::spawn(async move {
                            match monitor.sample_once().await {
                                Ok(snapshot) => tracing::debug!(
                                    "Sampled cpu {:.1}% mem {:.1}%",
                                    snapshot.cpu_usage,
                                    snapshot.memory_usage
                                ),
                                Err(e) => tracing::error!("Sampling failed: {}", e),
                            }
                        });
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            tracing::info!("Sampler stopped");
        });

        SamplerHandle { shutdown_tx, task }
    }
}

/// Running sampler; dropping it without `stop` leaves the loop running
pub struct SamplerHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SamplerHandle {
    /// Stop scheduling ticks and wait for the loop to exit
    ///
    /// Ticks already in flight finish on their own.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!("Sampler task ended abnormally: {}", e);
        }
    }
}
