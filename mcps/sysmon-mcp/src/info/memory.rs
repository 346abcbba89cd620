//! Memory normalization

use super::percent;
use crate::error::ToolError;
use crate::provider::{FactSource, RawMemory};
use crate::types::MemoryInfo;

pub fn normalize(mem: RawMemory) -> MemoryInfo {
    MemoryInfo {
        usage_percent: percent(mem.used, mem.total),
        swap_usage_percent: percent(mem.swap_used, mem.swap_total),
        total: mem.total,
        used: mem.used,
        free: mem.free,
        available: mem.available,
        swap_total: mem.swap_total,
        swap_used: mem.swap_used,
        swap_free: mem.swap_free,
    }
}

pub async fn get_memory_info(source: &FactSource) -> Result<MemoryInfo, ToolError> {
    let mem = source.probe("memory", source.provider().memory()).await?;
    Ok(normalize(mem))
}
