//! Process information types

use serde::{Deserialize, Serialize};

/// One running process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    /// Full command line
    pub command: String,
    /// CPU usage percentage since the previous refresh
    pub cpu_usage: f32,
    /// Resident memory in bytes
    pub memory_usage: u64,
    pub memory_usage_percent: f64,
    pub status: String,
    /// Start instant, ISO-8601
    pub start_time: String,
    pub user: Option<String>,
    pub priority: Option<i32>,
}

impl ProcessInfo {
    /// Numeric value of a sortable field; unknown fields and missing values are 0
    /// Fields accepted by [`ProcessInfo::sort_value`]; anything else ranks as 0
    pub const SORT_FIELDS: [&'static str; 5] = [
        "cpu_usage",
        "memory_usage",
        "memory_usage_percent",
        "priority",
        "pid",
    ];

    pub fn sort_value(&self, field: &str) -> f64 {
        match field {
            "cpu_usage" => f64::from(self.cpu_usage),
            "memory_usage" => self.memory_usage as f64,
            "memory_usage_percent" => self.memory_usage_percent,
            "priority" => self.priority.map(f64::from).unwrap_or(0.0),
            "pid" => f64::from(self.pid),
            _ => 0.0,
        }
    }
}
