//! USB device types

use serde::{Deserialize, Serialize};

/// One attached USB device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsbDevice {
    pub bus: Option<u32>,
    pub device_id: Option<u32>,
    pub name: String,
    pub vendor_id: String,
    pub product_id: String,
    pub manufacturer: Option<String>,
    pub serial_number: Option<String>,
}
