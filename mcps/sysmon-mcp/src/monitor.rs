//! Owned component graph: aggregator, history and alerts
//!
//! [`Monitor::sample_once`] is one sampler tick; the background sampler and the
//! tests both drive it.

use std::sync::Arc;

use crate::aggregator::Aggregator;
use crate::alerts::AlertEvaluator;
use crate::error::MonitorError;
use crate::history::HistoryStore;
use crate::types::{Domain, DiskUsage, MetricSnapshot, SystemMetrics};

pub struct Monitor {
    aggregator: Aggregator,
    history: Arc<HistoryStore>,
    alerts: AlertEvaluator,
}

impl Monitor {
    pub fn new(aggregator: Aggregator, history: Arc<HistoryStore>, alerts: AlertEvaluator) -> Self {
        Self {
            aggregator,
            history,
            alerts,
        }
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn alerts(&self) -> &AlertEvaluator {
        &self.alerts
    }

    /// Aggregate, record and evaluate one snapshot
    ///
    /// A snapshot that cannot be written to disk is still kept in memory and
    /// evaluated; the write failure is only logged.
    pub async fn sample_once(&self) -> Result<MetricSnapshot, MonitorError> {
        let metrics = self.aggregator.get_all_metrics().await?;
        let snapshot = snapshot_from(&metrics)?;

        if let Err(e) = self.history.append(snapshot.clone()).await {
            tracing::warn!("Failed to persist metrics history: {}", e);
        }

        self.alerts.check(&snapshot);
        Ok(snapshot)
    }
}

/// Reduce an aggregate to a history point
///
/// CPU and memory are required; failed disks become an empty list.
pub fn snapshot_from(metrics: &SystemMetrics) -> Result<MetricSnapshot, MonitorError> {
    let cpu = required("cpu_info", &metrics.cpu_info)?;
    let memory = required("memory_info", &metrics.memory_info)?;

    let disks = metrics
        .disks
        .ok()
        .map(|disks| {
            disks
                .iter()
                .map(|d| DiskUsage {
                    mount: d.mount_point.clone(),
                    usage: d.usage_percent,
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(MetricSnapshot {
        timestamp: metrics.timestamp,
        cpu_usage: f64::from(cpu.usage_percent),
        memory_usage: memory.usage_percent,
        temperature: cpu.temperature.map(f64::from),
        disks,
    })
}

fn required<'a, T>(domain: &'static str, slot: &'a Domain<T>) -> Result<&'a T, MonitorError> {
    match slot {
        Domain::Ok(value) => Ok(value),
        Domain::Failed(e) => Err(MonitorError::Incomplete {
            domain,
            reason: e.error.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::DEFAULT_SYSTEM_TTL;
    use crate::alerts::Thresholds;
    use crate::provider::fixture::{source, FixtureProvider};
    use crate::provider::RawMemory;

    fn monitor(provider: FixtureProvider, capacity: usize) -> Monitor {
        Monitor::new(
            Aggregator::new(source(provider), DEFAULT_SYSTEM_TTL),
            Arc::new(HistoryStore::in_memory(capacity)),
            AlertEvaluator::new(Thresholds::default()),
        )
    }

    #[tokio::test]
    async fn test_sample_once_records_snapshot() {
        let monitor = monitor(FixtureProvider::healthy(), 10);
        let snapshot = monitor.sample_once().await.unwrap();

        assert_eq!(snapshot.cpu_usage, 35.0);
        assert_eq!(snapshot.memory_usage, 50.0);
        assert_eq!(snapshot.temperature, Some(55.0));
        assert_eq!(
            snapshot.disks,
            vec![
                DiskUsage { mount: "/".into(), usage: 75.0 },
                DiskUsage { mount: "/home".into(), usage: 10.0 },
            ]
        );
        assert_eq!(monitor.history().query(10).await, vec![snapshot]);
    }

    #[tokio::test]
    async fn test_missing_memory_skips_tick() {
        let provider = FixtureProvider {
            memory: None,
            ..FixtureProvider::healthy()
        };
        let monitor = monitor(provider, 10);

        let err = monitor.sample_once().await.unwrap_err();
        assert!(matches!(err, MonitorError::Incomplete { domain: "memory_info", .. }));
        assert!(monitor.history().is_empty().await);
    }

    #[tokio::test]
    async fn test_failed_disks_default_to_empty() {
        let provider = FixtureProvider {
            filesystems: None,
            temperature: None,
            ..FixtureProvider::healthy()
        };
        let snapshot = monitor(provider, 10).sample_once().await.unwrap();

        assert!(snapshot.disks.is_empty());
        assert_eq!(snapshot.temperature, None);
    }

    #[tokio::test]
    async fn test_history_is_bounded_across_ticks() {
        let provider = FixtureProvider {
            memory: Some(RawMemory {
                total: 100,
                used: 95,
                ..Default::default()
            }),
            ..FixtureProvider::healthy()
        };
        let monitor = monitor(provider, 2);
        for _ in 0..4 {
            monitor.sample_once().await.unwrap();
        }

        let history = monitor.history().query(10).await;
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|s| s.memory_usage == 95.0));
    }
}
