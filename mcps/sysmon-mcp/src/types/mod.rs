//! Response types for host telemetry

mod battery;
mod cpu;
mod disk;
mod memory;
mod metrics;
mod network;
mod process;
mod system;
mod usb;

pub use battery::*;
pub use cpu::*;
pub use disk::*;
pub use memory::*;
pub use metrics::*;
pub use network::*;
pub use process::*;
pub use system::*;
pub use usb::*;
