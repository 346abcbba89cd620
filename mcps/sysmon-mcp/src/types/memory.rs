//! Memory information types

use serde::{Deserialize, Serialize};

/// RAM and swap usage, all sizes in bytes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryInfo {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub available: u64,
    pub swap_total: u64,
    pub swap_used: u64,
    pub swap_free: u64,
    pub usage_percent: f64,
    /// 0 when the host has no swap
    pub swap_usage_percent: f64,
}
