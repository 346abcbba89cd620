//! Disk information types

use serde::{Deserialize, Serialize};

/// One mounted filesystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskInfo {
    /// Device name
    pub name: String,
    pub mount_point: String,
    /// Filesystem type (e.g., "ext4", "apfs")
    pub file_system: String,
    pub total_space: u64,
    pub used_space: u64,
    pub free_space: u64,
    pub usage_percent: f64,
}
