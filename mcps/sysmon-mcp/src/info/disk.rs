//! Disk normalization

use super::percent;
use crate::error::ToolError;
use crate::provider::{FactSource, RawFilesystem};
use crate::types::DiskInfo;

pub fn normalize(fs: RawFilesystem) -> DiskInfo {
    let used = fs.size.saturating_sub(fs.available);
    DiskInfo {
        name: fs.device,
        mount_point: fs.mount,
        file_system: fs.fs_type,
        total_space: fs.size,
        used_space: used,
        free_space: fs.available,
        usage_percent: percent(used, fs.size),
    }
}

/// Normalize filesystems, keeping mount points that contain `mount_filter` (case-sensitive)
pub fn normalize_all(filesystems: Vec<RawFilesystem>, mount_filter: Option<&str>) -> Vec<DiskInfo> {
    filesystems
        .into_iter()
        .filter(|fs| mount_filter.map_or(true, |filter| fs.mount.contains(filter)))
        .map(normalize)
        .collect()
}

pub async fn get_disk_info(
    source: &FactSource,
    mount_filter: Option<&str>,
) -> Result<Vec<DiskInfo>, ToolError> {
    let filesystems = source
        .probe("filesystem", source.provider().filesystems())
        .await?;
    Ok(normalize_all(filesystems, mount_filter))
}
