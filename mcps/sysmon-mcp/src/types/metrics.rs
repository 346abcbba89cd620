//! Composite metrics and history snapshots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CpuInfo, DiskInfo, MemoryInfo, NetworkInfo, ProcessInfo, SystemInfo};

/// Inline failure marker: `{"error": "<message>"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub error: String,
}

impl ErrorObject {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// One domain slot of an aggregate: the data, or that domain's error object
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Domain<T> {
    Ok(T),
    Failed(ErrorObject),
}

impl<T> Domain<T> {
    pub fn ok(&self) -> Option<&T> {
        match self {
            Domain::Ok(value) => Some(value),
            Domain::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Domain::Failed(_))
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for Domain<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Domain::Ok(value),
            Err(e) => Domain::Failed(ErrorObject::new(e.to_string())),
        }
    }
}

/// Everything in one call
#[derive(Debug, Clone, Serialize)]
pub struct SystemMetrics {
    pub timestamp: DateTime<Utc>,
    pub system_info: Domain<SystemInfo>,
    pub cpu_info: Domain<CpuInfo>,
    pub memory_info: Domain<MemoryInfo>,
    pub disks: Domain<Vec<DiskInfo>>,
    pub networks: Domain<Vec<NetworkInfo>>,
    /// Top processes by CPU usage
    pub processes: Domain<Vec<ProcessInfo>>,
}

/// Usage of a single mount inside a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskUsage {
    pub mount: String,
    pub usage: f64,
}

/// One sampled point of the metrics history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub timestamp: DateTime<Utc>,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub temperature: Option<f64>,
    pub disks: Vec<DiskUsage>,
}
