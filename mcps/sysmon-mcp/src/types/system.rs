//! System identity types

use serde::{Deserialize, Serialize};

/// Host identity and uptime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub hostname: String,
    /// Distribution name (e.g., "Ubuntu", "Arch Linux", "macOS")
    pub os_name: String,
    /// Distribution release
    pub os_version: String,
    pub kernel_version: String,
    /// Uptime in seconds
    pub uptime: u64,
    /// Boot instant, ISO-8601 with millisecond precision
    pub boot_time: String,
}
