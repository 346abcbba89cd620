//! Network information types

use serde::{Deserialize, Serialize};

/// One network interface joined with its traffic counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInfo {
    /// Interface name (e.g., "eth0", "en0")
    pub interface: String,
    /// First IPv4 address, empty when none is assigned
    pub ip_address: String,
    pub mac_address: String,
    pub bytes_received: u64,
    pub bytes_transmitted: u64,
    pub packets_received: u64,
    pub packets_transmitted: u64,
    pub errors_received: u64,
    pub errors_transmitted: u64,
}
