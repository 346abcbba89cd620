//! CPU information types

use serde::{Deserialize, Serialize};

/// CPU identity and instantaneous load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    /// Manufacturer and brand, space separated
    pub name: String,
    pub brand: String,
    /// Provider speed (MHz) scaled by 1000
    pub frequency: u64,
    /// Physical core count
    pub cores: usize,
    /// Global load percentage (0-100)
    pub usage_percent: f32,
    /// Package temperature in Celsius, `null` when no sensor is readable
    pub temperature: Option<f32>,
}
