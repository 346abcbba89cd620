//! Battery normalization

use crate::provider::{FactSource, RawBattery};
use crate::types::{BatteryInfo, Domain};

pub fn normalize(raw: RawBattery) -> BatteryInfo {
    let is_charging = raw
        .status
        .as_deref()
        .is_some_and(|s| s.eq_ignore_ascii_case("charging"));

    BatteryInfo {
        has_battery: raw.present,
        is_charging,
        ac_connected: raw.ac_online || is_charging,
        percent: raw.capacity_percent,
        cycle_count: raw.cycle_count,
        voltage: raw.voltage_volts,
        designed_capacity: raw.energy_full_design,
        max_capacity: raw.energy_full,
        current_capacity: raw.energy_now,
        capacity_unit: raw.capacity_unit,
        manufacturer: raw.manufacturer,
        model: raw.model,
    }
}

/// Battery state, or an inline error object when the probe fails
pub async fn get_battery_info(source: &FactSource) -> Domain<BatteryInfo> {
    source
        .probe("battery", source.provider().battery())
        .await
        .map(normalize)
        .into()
}
