//! Raw telemetry providers
//!
//! A [`FactProvider`] answers raw OS queries; every probe may fail on its own.
//! [`FactSource`] wraps a provider with the per-probe timeout the rest of the
//! crate relies on.

mod sysfs;
mod system;

pub use system::SysinfoProvider;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ProviderError;

/// Default bound on a single provider probe
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// Raw Facts
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOsInfo {
    pub hostname: String,
    pub distro: String,
    pub release: String,
    pub kernel: String,
}

/// Clock facts; zero means "not reported"
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawTime {
    /// Current wall clock, epoch milliseconds
    pub current_ms: i64,
    pub uptime_secs: u64,
    /// Boot instant, epoch seconds
    pub boot_time_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCpu {
    pub manufacturer: String,
    pub brand: String,
    pub speed_mhz: u64,
    pub physical_cores: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMemory {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub available: u64,
    pub swap_total: u64,
    pub swap_used: u64,
    pub swap_free: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFilesystem {
    pub device: String,
    pub mount: String,
    pub fs_type: String,
    pub size: u64,
    pub available: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawInterface {
    pub iface: String,
    pub ip4: Option<String>,
    pub mac: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawInterfaceStats {
    pub iface: String,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    pub rx_packets: u64,
    pub tx_packets: u64,
    pub rx_errors: u64,
    pub tx_errors: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawProcess {
    pub pid: u32,
    pub name: String,
    pub command: String,
    pub cpu_percent: f32,
    pub memory_bytes: u64,
    pub memory_percent: f64,
    pub status: String,
    /// Start instant, epoch seconds
    pub started_secs: u64,
    pub user: Option<String>,
    pub priority: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBattery {
    pub present: bool,
    pub status: Option<String>,
    pub ac_online: bool,
    pub capacity_percent: Option<f64>,
    pub cycle_count: Option<u64>,
    pub voltage_volts: Option<f64>,
    pub energy_full_design: Option<f64>,
    pub energy_full: Option<f64>,
    pub energy_now: Option<f64>,
    pub capacity_unit: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawUsbDevice {
    pub busnum: Option<u32>,
    pub devnum: Option<u32>,
    pub product: Option<String>,
    pub id_vendor: String,
    pub id_product: String,
    pub manufacturer: Option<String>,
    pub serial: Option<String>,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// Source of raw OS telemetry
#[async_trait]
pub trait FactProvider: Send + Sync {
    async fn os_info(&self) -> Result<RawOsInfo, ProviderError>;

    /// Clock facts are read synchronously and never fail
    fn time(&self) -> RawTime;

    async fn cpu(&self) -> Result<RawCpu, ProviderError>;

    /// Global CPU load percentage
    async fn current_load(&self) -> Result<f32, ProviderError>;

    /// Main CPU temperature in Celsius, `None` without a readable sensor
    async fn cpu_temperature(&self) -> Result<Option<f32>, ProviderError>;

    async fn memory(&self) -> Result<RawMemory, ProviderError>;

    async fn filesystems(&self) -> Result<Vec<RawFilesystem>, ProviderError>;

    async fn network_interfaces(&self) -> Result<Vec<RawInterface>, ProviderError>;

    async fn network_stats(&self) -> Result<Vec<RawInterfaceStats>, ProviderError>;

    async fn processes(&self) -> Result<Vec<RawProcess>, ProviderError>;

    async fn battery(&self) -> Result<RawBattery, ProviderError>;

    async fn usb_devices(&self) -> Result<Vec<RawUsbDevice>, ProviderError>;
}

/// A provider plus the timeout applied to each of its probes
#[derive(Clone)]
pub struct FactSource {
    provider: Arc<dyn FactProvider>,
    timeout: Duration,
}

impl FactSource {
    pub fn new(provider: Arc<dyn FactProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn provider(&self) -> &dyn FactProvider {
        self.provider.as_ref()
    }

    /// Run one probe, failing with [`ProviderError::Timeout`] when it stalls
    pub async fn probe<T, F>(&self, probe: &'static str, fut: F) -> Result<T, ProviderError>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("{} probe exceeded {:?}", probe, self.timeout);
                Err(ProviderError::Timeout {
                    probe,
                    timeout: self.timeout,
                })
            }
        }
    }
}

/// Run a synchronous OS read on the blocking pool
///
/// The calling future stays cancellable while `f` runs, so a [`FactSource`]
/// timeout fires even when the read itself never returns.
pub(crate) async fn blocking<T, F>(probe: &'static str, f: F) -> Result<T, ProviderError>
where
    F: FnOnce() -> Result<T, ProviderError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ProviderError::Failed(format!("{} probe aborted: {}", probe, e)))?
}
