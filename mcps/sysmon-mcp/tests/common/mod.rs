//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sysmon_mcp::error::ProviderError;
use sysmon_mcp::provider::{
    RawBattery, RawCpu, RawFilesystem, RawInterface, RawInterfaceStats, RawMemory, RawOsInfo,
    RawProcess, RawTime, RawUsbDevice,
};
use sysmon_mcp::{
    Aggregator, AlertEvaluator, FactProvider, FactSource, HistoryStore, Monitor, SysMonMcpServer,
};

/// Deterministic host; `failing_memory` makes the memory probe fail
#[derive(Default)]
pub struct StubHost {
    pub failing_memory: bool,
}

fn process(pid: u32, name: &str, cpu: f32) -> RawProcess {
    RawProcess {
        pid,
        name: name.to_string(),
        command: format!("/usr/bin/{}", name),
        cpu_percent: cpu,
        memory_bytes: 1024,
        status: "Run".to_string(),
        started_secs: 1_700_000_000,
        ..Default::default()
    }
}

#[async_trait]
impl FactProvider for StubHost {
    async fn os_info(&self) -> Result<RawOsInfo, ProviderError> {
        Ok(RawOsInfo {
            hostname: "stub-host".into(),
            distro: "Stub Linux".into(),
            release: "2.0".into(),
            kernel: "6.6.0".into(),
        })
    }

    fn time(&self) -> RawTime {
        RawTime {
            current_ms: 1_700_000_100_000,
            uptime_secs: 100,
            boot_time_secs: 0,
        }
    }

    async fn cpu(&self) -> Result<RawCpu, ProviderError> {
        Ok(RawCpu {
            manufacturer: "AuthenticAMD".into(),
            brand: "Ryzen 7".into(),
            speed_mhz: 3600,
            physical_cores: 8,
        })
    }

    async fn current_load(&self) -> Result<f32, ProviderError> {
        Ok(12.5)
    }

    async fn cpu_temperature(&self) -> Result<Option<f32>, ProviderError> {
        Ok(None)
    }

    async fn memory(&self) -> Result<RawMemory, ProviderError> {
        if self.failing_memory {
            return Err(ProviderError::Failed("memory sensor offline".into()));
        }
        Ok(RawMemory {
            total: 8_000,
            used: 2_000,
            free: 6_000,
            available: 6_000,
            ..Default::default()
        })
    }

    async fn filesystems(&self) -> Result<Vec<RawFilesystem>, ProviderError> {
        Ok(["/", "/home", "/var"]
            .into_iter()
            .map(|mount| RawFilesystem {
                device: format!("/dev/{}", mount.trim_start_matches('/')),
                mount: mount.to_string(),
                fs_type: "ext4".into(),
                size: 1000,
                available: 500,
            })
            .collect())
    }

    async fn network_interfaces(&self) -> Result<Vec<RawInterface>, ProviderError> {
        Ok(vec![RawInterface {
            iface: "lo".into(),
            ip4: Some("127.0.0.1".into()),
            mac: "00:00:00:00:00:00".into(),
        }])
    }

    async fn network_stats(&self) -> Result<Vec<RawInterfaceStats>, ProviderError> {
        Ok(Vec::new())
    }

    async fn processes(&self) -> Result<Vec<RawProcess>, ProviderError> {
        Ok(vec![
            process(10, "chrome", 10.0),
            process(11, "chrome", 50.0),
            process(12, "sshd", 5.0),
            process(13, "chrome", 30.0),
        ])
    }

    async fn battery(&self) -> Result<RawBattery, ProviderError> {
        Err(ProviderError::Unsupported("battery"))
    }

    async fn usb_devices(&self) -> Result<Vec<RawUsbDevice>, ProviderError> {
        Ok(Vec::new())
    }
}

pub fn monitor(host: StubHost) -> Arc<Monitor> {
    let source = FactSource::new(Arc::new(host), Duration::from_secs(1));
    Arc::new(Monitor::new(
        Aggregator::new(source, Duration::from_secs(60)),
        Arc::new(HistoryStore::in_memory(10)),
        AlertEvaluator::default(),
    ))
}

pub fn server(host: StubHost) -> SysMonMcpServer {
    SysMonMcpServer::new(monitor(host))
}
