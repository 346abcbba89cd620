//! Concurrent fan-out over the per-domain fetchers
//!
//! [`Aggregator::get_all_metrics`] spawns one task per domain and waits for all of
//! them. A domain that fails lands in its slot as `{error}`; only a task that
//! cannot be joined fails the whole call.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;

use crate::cache::TtlCache;
use crate::error::ToolError;
use crate::info::{self, process::ProcessQuery};
use crate::provider::FactSource;
use crate::types::{
    BatteryInfo, CpuInfo, DiskInfo, Domain, MemoryInfo, NetworkInfo, ProcessInfo, SystemInfo,
    SystemMetrics, UsbDevice,
};

/// Default lifetime of cached system identity facts
pub const DEFAULT_SYSTEM_TTL: Duration = Duration::from_secs(60);

/// Processes included in the aggregate snapshot
pub const TOP_PROCESS_LIMIT: usize = 10;

const SYSTEM_FACTS: &str = "system";

/// Shapes provider facts into tool results; cheap to clone
#[derive(Clone)]
pub struct Aggregator {
    source: FactSource,
    system_cache: Arc<TtlCache<&'static str, SystemInfo>>,
    system_ttl: Duration,
}

impl Aggregator {
    pub fn new(source: FactSource, system_ttl: Duration) -> Self {
        Self {
            source,
            system_cache: Arc::new(TtlCache::new()),
            system_ttl,
        }
    }

    /// System identity, served from the TTL cache
    pub async fn system_info(&self) -> Result<SystemInfo, ToolError> {
        self.system_cache
            .get_or_refresh(SYSTEM_FACTS, self.system_ttl, || {
                info::system::get_system_info(&self.source)
            })
            .await
    }

    pub async fn cpu_info(&self) -> Result<CpuInfo, ToolError> {
        info::cpu::get_cpu_info(&self.source).await
    }

    pub async fn memory_info(&self) -> Result<MemoryInfo, ToolError> {
        info::memory::get_memory_info(&self.source).await
    }

    pub async fn disk_info(&self, mount_filter: Option<&str>) -> Result<Vec<DiskInfo>, ToolError> {
        info::disk::get_disk_info(&self.source, mount_filter).await
    }

    pub async fn network_info(&self) -> Result<Vec<NetworkInfo>, ToolError> {
        info::network::get_network_info(&self.source).await
    }

    pub async fn processes(&self, query: &ProcessQuery) -> Result<Vec<ProcessInfo>, ToolError> {
        info::process::get_processes(&self.source, query).await
    }

    pub async fn battery_info(&self) -> Domain<BatteryInfo> {
        info::battery::get_battery_info(&self.source).await
    }

    pub async fn usb_devices(&self) -> Domain<Vec<UsbDevice>> {
        info::usb::get_usb_devices(&self.source).await
    }

    /// Every domain at once, tolerating per-domain failures
    pub async fn get_all_metrics(&self) -> Result<SystemMetrics, ToolError> {
        let system = {
            let this = self.clone();
            tokio::spawn(async move { this.system_info().await })
        };
        let cpu = self.branch(|s| async move { info::cpu::get_cpu_info(&s).await });
        let memory = self.branch(|s| async move { info::memory::get_memory_info(&s).await });
        let disks = self.branch(|s| async move { info::disk::get_disk_info(&s, None).await });
        let networks = self.branch(|s| async move { info::network::get_network_info(&s).await });
        let processes = self.branch(|s| async move {
            info::process::get_processes(&s, &ProcessQuery::top_by_cpu(TOP_PROCESS_LIMIT)).await
        });

        let (system, cpu, memory, disks, networks, processes) =
            tokio::join!(system, cpu, memory, disks, networks, processes);

        Ok(SystemMetrics {
            timestamp: Utc::now(),
            system_info: slot("system_info", system?),
            cpu_info: slot("cpu_info", cpu?),
            memory_info: slot("memory_info", memory?),
            disks: slot("disks", disks?),
            networks: slot("networks", networks?),
            processes: slot("processes", processes?),
        })
    }

    fn branch<T, F, Fut>(&self, fetch: F) -> JoinHandle<Result<T, ToolError>>
    where
        F: FnOnce(FactSource) -> Fut,
        Fut: Future<Output = Result<T, ToolError>> + Send + 'static,
        T: Send + 'static,
    {
        tokio::spawn(fetch(self.source.clone()))
    }
}

fn slot<T>(domain: &str, result: Result<T, ToolError>) -> Domain<T> {
    if let Err(e) = &result {
        tracing::warn!("{} unavailable: {}", domain, e);
    }
    result.into()
}
