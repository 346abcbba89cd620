//! Provider backed by the `sysinfo` crate, with sysfs for what it does not cover
//!
//! Every probe body runs on the blocking pool. `System` sits behind a std mutex
//! that is only ever locked from inside those blocking closures.

use std::ffi::OsStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sysinfo::{Components, Disks, Networks, System, Users};

use super::{
    blocking, sysfs, FactProvider, RawBattery, RawCpu, RawFilesystem, RawInterface,
    RawInterfaceStats, RawMemory, RawOsInfo, RawProcess, RawTime, RawUsbDevice,
};
use crate::error::ProviderError;

/// Gap between the two refreshes needed for a CPU usage reading
const CPU_SAMPLE_GAP: Duration = Duration::from_millis(200);

/// Component labels that identify the main CPU sensor, in preference order
const CPU_SENSOR_LABELS: [&str; 5] = ["package", "tctl", "cpu", "soc", "core"];

/// Live host provider
pub struct SysinfoProvider {
    system: Arc<Mutex<System>>,
}

impl SysinfoProvider {
    pub fn new() -> Self {
        Self {
            system: Arc::new(Mutex::new(System::new_all())),
        }
    }

    /// Run `f` against the shared `System` on the blocking pool
    async fn with_system<T, F>(&self, probe: &'static str, f: F) -> Result<T, ProviderError>
    where
        F: FnOnce(&mut System) -> Result<T, ProviderError> + Send + 'static,
        T: Send + 'static,
    {
        let system = self.system.clone();
        blocking(probe, move || {
            let mut sys = system.lock().map_err(|_| {
                ProviderError::Failed(format!("{} probe: system state poisoned", probe))
            })?;
            f(&mut sys)
        })
        .await
    }
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Temperature of the best-matching CPU sensor, else the first readable one
fn cpu_temperature(components: &Components) -> Option<f32> {
    let readable: Vec<(String, f32)> = components
        .iter()
        .map(|c| (c.label().to_ascii_lowercase(), c.temperature()))
        .filter(|(_, temp)| temp.is_finite() && *temp > 0.0)
        .collect();

    CPU_SENSOR_LABELS
        .iter()
        .find_map(|wanted| {
            readable
                .iter()
                .find(|(label, _)| label.contains(wanted))
                .map(|(_, temp)| *temp)
        })
        .or_else(|| readable.first().map(|(_, temp)| *temp))
}

#[async_trait]
impl FactProvider for SysinfoProvider {
    async fn os_info(&self) -> Result<RawOsInfo, ProviderError> {
        blocking("os", || {
            Ok(RawOsInfo {
                hostname: System::host_name().unwrap_or_default(),
                distro: System::name().unwrap_or_default(),
                release: System::os_version().unwrap_or_default(),
                kernel: System::kernel_version().unwrap_or_default(),
            })
        })
        .await
    }

    fn time(&self) -> RawTime {
        RawTime {
            current_ms: Utc::now().timestamp_millis(),
            uptime_secs: System::uptime(),
            boot_time_secs: System::boot_time(),
        }
    }

    async fn cpu(&self) -> Result<RawCpu, ProviderError> {
        self.with_system("cpu", |sys| {
            sys.refresh_cpu_all();

            let cpus = sys.cpus();
            let first = cpus
                .first()
                .ok_or_else(|| ProviderError::Failed("no CPUs reported".to_string()))?;

            Ok(RawCpu {
                manufacturer: first.vendor_id().to_string(),
                brand: first.brand().trim().to_string(),
                speed_mhz: first.frequency(),
                physical_cores: sys.physical_core_count().unwrap_or(cpus.len()),
            })
        })
        .await
    }

    async fn current_load(&self) -> Result<f32, ProviderError> {
        self.with_system("load", |sys| {
            sys.refresh_cpu_usage();
            std::thread::sleep(CPU_SAMPLE_GAP);
            sys.refresh_cpu_usage();
            Ok(sys.global_cpu_usage())
        })
        .await
    }

    async fn cpu_temperature(&self) -> Result<Option<f32>, ProviderError> {
        blocking("temperature", || {
            Ok(cpu_temperature(&Components::new_with_refreshed_list()))
        })
        .await
    }

    async fn memory(&self) -> Result<RawMemory, ProviderError> {
        self.with_system("memory", |sys| {
            sys.refresh_memory();

            Ok(RawMemory {
                total: sys.total_memory(),
                used: sys.used_memory(),
                free: sys.free_memory(),
                available: sys.available_memory(),
                swap_total: sys.total_swap(),
                swap_used: sys.used_swap(),
                swap_free: sys.free_swap(),
            })
        })
        .await
    }

    async fn filesystems(&self) -> Result<Vec<RawFilesystem>, ProviderError> {
        blocking("filesystem", || {
            let disks = Disks::new_with_refreshed_list();

            Ok(disks
                .iter()
                .map(|disk| RawFilesystem {
                    device: disk.name().to_string_lossy().to_string(),
                    mount: disk.mount_point().to_string_lossy().to_string(),
                    fs_type: disk.file_system().to_string_lossy().to_string(),
                    size: disk.total_space(),
                    available: disk.available_space(),
                })
                .collect())
        })
        .await
    }

    async fn network_interfaces(&self) -> Result<Vec<RawInterface>, ProviderError> {
        blocking("interface", || {
            let networks = Networks::new_with_refreshed_list();

            let mut interfaces: Vec<RawInterface> = networks
                .iter()
                .map(|(name, data)| RawInterface {
                    iface: name.clone(),
                    ip4: data
                        .ip_networks()
                        .iter()
                        .find(|ip| ip.addr.is_ipv4())
                        .map(|ip| ip.addr.to_string()),
                    mac: data.mac_address().to_string(),
                })
                .collect();
            interfaces.sort_by(|a, b| a.iface.cmp(&b.iface));

            Ok(interfaces)
        })
        .await
    }

    async fn network_stats(&self) -> Result<Vec<RawInterfaceStats>, ProviderError> {
        blocking("network stats", || {
            let networks = Networks::new_with_refreshed_list();

            Ok(networks
                .iter()
                .map(|(name, data)| RawInterfaceStats {
                    iface: name.clone(),
                    rx_bytes: data.total_received(),
                    tx_bytes: data.total_transmitted(),
                    rx_packets: data.total_packets_received(),
                    tx_packets: data.total_packets_transmitted(),
                    rx_errors: data.total_errors_on_received(),
                    tx_errors: data.total_errors_on_transmitted(),
                })
                .collect())
        })
        .await
    }

    async fn processes(&self) -> Result<Vec<RawProcess>, ProviderError> {
        self.with_system("process", |sys| {
            sys.refresh_all();

            let total_memory = sys.total_memory();
            let users = Users::new_with_refreshed_list();

            Ok(sys
                .processes()
                .iter()
                .map(|(pid, process)| {
                    let memory = process.memory();
                    RawProcess {
                        pid: pid.as_u32(),
                        name: OsStr::new(process.name()).to_string_lossy().into_owned(),
                        command: process
                            .cmd()
                            .iter()
                            .map(|arg| OsStr::new(arg).to_string_lossy().into_owned())
                            .collect::<Vec<_>>()
                            .join(" "),
                        cpu_percent: process.cpu_usage(),
                        memory_bytes: memory,
                        memory_percent: if total_memory > 0 {
                            (memory as f64 / total_memory as f64) * 100.0
                        } else {
                            0.0
                        },
                        status: process.status().to_string(),
                        started_secs: process.start_time(),
                        user: process
                            .user_id()
                            .and_then(|uid| users.get_user_by_id(uid))
                            .map(|user| user.name().to_string()),
                        priority: sysfs::process_priority(pid.as_u32()),
                    }
                })
                .collect())
        })
        .await
    }

    async fn battery(&self) -> Result<RawBattery, ProviderError> {
        blocking("battery", sysfs::battery).await
    }

    async fn usb_devices(&self) -> Result<Vec<RawUsbDevice>, ProviderError> {
        blocking("usb", sysfs::usb_devices).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::FactSource;

    #[tokio::test]
    async fn test_live_memory_probe() {
        let source = FactSource::new(Arc::new(SysinfoProvider::new()), Duration::from_secs(10));
        let memory = source.probe("memory", source.provider().memory()).await.unwrap();

        assert!(memory.total > 0);
        assert!(memory.used <= memory.total);
    }

    #[tokio::test]
    async fn test_live_temperature_probe_never_fails() {
        let provider = SysinfoProvider::new();
        let temperature = provider.cpu_temperature().await.unwrap();

        if let Some(celsius) = temperature {
            assert!(celsius.is_finite() && celsius > 0.0);
        }
    }
}
