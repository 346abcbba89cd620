//! CPU normalization

use crate::provider::{FactSource, RawCpu};
use crate::error::ToolError;
use crate::types::CpuInfo;

pub fn normalize(cpu: RawCpu, load: f32, temperature: Option<f32>) -> CpuInfo {
    CpuInfo {
        name: format!("{} {}", cpu.manufacturer, cpu.brand),
        brand: cpu.brand,
        frequency: cpu.speed_mhz * 1000,
        cores: cpu.physical_cores,
        usage_percent: load,
        temperature,
    }
}

/// Fetch CPU identity, load and temperature
///
/// A failing temperature sensor only blanks `temperature`.
pub async fn get_cpu_info(source: &FactSource) -> Result<CpuInfo, ToolError> {
    let provider = source.provider();
    let (cpu, load, temperature) = tokio::join!(
        source.probe("cpu", provider.cpu()),
        source.probe("load", provider.current_load()),
        source.probe("temperature", provider.cpu_temperature()),
    );

    let temperature = temperature.unwrap_or_else(|e| {
        tracing::debug!("CPU temperature unavailable: {}", e);
        None
    });

    Ok(normalize(cpu?, load?, temperature))
}
