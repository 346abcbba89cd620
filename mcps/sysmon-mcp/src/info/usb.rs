//! USB device normalization

use crate::provider::{FactSource, RawUsbDevice};
use crate::types::{Domain, UsbDevice};

pub fn normalize(raw: RawUsbDevice) -> UsbDevice {
    let name = raw
        .product
        .unwrap_or_else(|| format!("{}:{}", raw.id_vendor, raw.id_product));

    UsbDevice {
        bus: raw.busnum,
        device_id: raw.devnum,
        name,
        vendor_id: raw.id_vendor,
        product_id: raw.id_product,
        manufacturer: raw.manufacturer,
        serial_number: raw.serial,
    }
}

/// Attached USB devices, or an inline error object when the probe fails
pub async fn get_usb_devices(source: &FactSource) -> Domain<Vec<UsbDevice>> {
    source
        .probe("usb", source.provider().usb_devices())
        .await
        .map(|devices| devices.into_iter().map(normalize).collect())
        .into()
}
