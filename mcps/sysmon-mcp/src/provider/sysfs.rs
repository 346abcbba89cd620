//! Linux sysfs/procfs readers for facts `sysinfo` does not expose
//!
//! All of these do synchronous file I/O and are called from the blocking pool.

use crate::error::ProviderError;

use super::{RawBattery, RawUsbDevice};

#[cfg(target_os = "linux")]
mod linux {
    use std::path::Path;

    use super::{ProviderError, RawBattery, RawUsbDevice};

    const POWER_SUPPLY_ROOT: &str = "/sys/class/power_supply";
    const USB_DEVICES_ROOT: &str = "/sys/bus/usb/devices";

    fn read_trimmed(path: &Path) -> Option<String> {
        let raw = std::fs::read_to_string(path).ok()?;
        let value = raw.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    fn read_f64(path: &Path) -> Option<f64> {
        read_trimmed(path).and_then(|v| v.parse().ok())
    }

    /// Kernel scheduling priority, field 18 of `/proc/<pid>/stat`
    pub fn process_priority(pid: u32) -> Option<i32> {
        let stat = std::fs::read_to_string(format!("/proc/{}/stat", pid)).ok()?;
        // comm may contain spaces; fields restart after the closing paren
        let rest = &stat[stat.rfind(')')? + 1..];
        rest.split_whitespace().nth(15)?.parse().ok()
    }

    pub fn battery() -> Result<RawBattery, ProviderError> {
        let root = Path::new(POWER_SUPPLY_ROOT);
        let entries = std::fs::read_dir(root).map_err(|source| ProviderError::Io {
            probe: "battery",
            source,
        })?;

        let mut battery = RawBattery::default();
        for entry in entries.flatten() {
            let dir = entry.path();
            let kind = read_trimmed(&dir.join("type")).unwrap_or_default();

            if kind.eq_ignore_ascii_case("mains") {
                battery.ac_online |= read_f64(&dir.join("online")).unwrap_or(0.0) > 0.0;
                continue;
            }
            if !kind.eq_ignore_ascii_case("battery") || battery.present {
                continue;
            }

            battery.present = read_f64(&dir.join("present")).map_or(true, |v| v > 0.0);
            battery.status = read_trimmed(&dir.join("status"));
            battery.capacity_percent = read_f64(&dir.join("capacity"));
            battery.cycle_count = read_trimmed(&dir.join("cycle_count")).and_then(|v| v.parse().ok());
            battery.voltage_volts = read_f64(&dir.join("voltage_now")).map(|v| v / 1_000_000.0);
            battery.manufacturer = read_trimmed(&dir.join("manufacturer"));
            battery.model = read_trimmed(&dir.join("model_name"));

            // energy_* in µWh, charge_* in µAh
            if let Some(full) = read_f64(&dir.join("energy_full")) {
                battery.capacity_unit = Some("Wh".to_string());
                battery.energy_full = Some(full / 1_000_000.0);
                battery.energy_full_design =
                    read_f64(&dir.join("energy_full_design")).map(|v| v / 1_000_000.0);
                battery.energy_now = read_f64(&dir.join("energy_now")).map(|v| v / 1_000_000.0);
            } else if let Some(full) = read_f64(&dir.join("charge_full")) {
                battery.capacity_unit = Some("mAh".to_string());
                battery.energy_full = Some(full / 1_000.0);
                battery.energy_full_design =
                    read_f64(&dir.join("charge_full_design")).map(|v| v / 1_000.0);
                battery.energy_now = read_f64(&dir.join("charge_now")).map(|v| v / 1_000.0);
            }
        }

        Ok(battery)
    }

    pub fn usb_devices() -> Result<Vec<RawUsbDevice>, ProviderError> {
        let entries = std::fs::read_dir(USB_DEVICES_ROOT).map_err(|source| ProviderError::Io {
            probe: "usb",
            source,
        })?;

        let mut devices: Vec<RawUsbDevice> = entries
            .flatten()
            .map(|e| e.path())
            .filter_map(|dir| {
                // interfaces (e.g. "1-1:1.0") have no idVendor and are skipped here
                let id_vendor = read_trimmed(&dir.join("idVendor"))?;
                Some(RawUsbDevice {
                    busnum: read_trimmed(&dir.join("busnum")).and_then(|v| v.parse().ok()),
                    devnum: read_trimmed(&dir.join("devnum")).and_then(|v| v.parse().ok()),
                    product: read_trimmed(&dir.join("product")),
                    id_vendor,
                    id_product: read_trimmed(&dir.join("idProduct")).unwrap_or_default(),
                    manufacturer: read_trimmed(&dir.join("manufacturer")),
                    serial: read_trimmed(&dir.join("serial")),
                })
            })
            .collect();
        devices.sort_by_key(|d| (d.busnum, d.devnum));

        Ok(devices)
    }
}

#[cfg(target_os = "linux")]
pub use linux::{battery, process_priority, usb_devices};

#[cfg(not(target_os = "linux"))]
pub fn process_priority(_pid: u32) -> Option<i32> {
    None
}

#[cfg(not(target_os = "linux"))]
pub fn battery() -> Result<RawBattery, ProviderError> {
    Err(ProviderError::Unsupported("battery"))
}

#[cfg(not(target_os = "linux"))]
pub fn usb_devices() -> Result<Vec<RawUsbDevice>, ProviderError> {
    Err(ProviderError::Unsupported("usb"))
}
