//! Battery information types

use serde::{Deserialize, Serialize};

/// Battery state; `has_battery` is false on hosts without one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryInfo {
    pub has_battery: bool,
    pub is_charging: bool,
    pub ac_connected: bool,
    /// Charge level (0-100)
    pub percent: Option<f64>,
    pub cycle_count: Option<u64>,
    /// Volts
    pub voltage: Option<f64>,
    pub designed_capacity: Option<f64>,
    pub max_capacity: Option<f64>,
    pub current_capacity: Option<f64>,
    /// "Wh" or "mAh"
    pub capacity_unit: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
}
