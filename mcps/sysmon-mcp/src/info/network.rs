//! Network normalization

use crate::error::ToolError;
use crate::provider::{FactSource, RawInterface, RawInterfaceStats};
use crate::types::NetworkInfo;

/// Join interface metadata with counters by name
///
/// Interfaces without a counter record are kept with zeroed counters.
pub fn normalize(interfaces: Vec<RawInterface>, stats: &[RawInterfaceStats]) -> Vec<NetworkInfo> {
    interfaces
        .into_iter()
        .map(|iface| {
            let counters = stats
                .iter()
                .find(|s| s.iface == iface.iface)
                .cloned()
                .unwrap_or_default();

            NetworkInfo {
                interface: iface.iface,
                ip_address: iface.ip4.unwrap_or_default(),
                mac_address: iface.mac,
                bytes_received: counters.rx_bytes,
                bytes_transmitted: counters.tx_bytes,
                packets_received: counters.rx_packets,
                packets_transmitted: counters.tx_packets,
                errors_received: counters.rx_errors,
                errors_transmitted: counters.tx_errors,
            }
        })
        .collect()
}

pub async fn get_network_info(source: &FactSource) -> Result<Vec<NetworkInfo>, ToolError> {
    let provider = source.provider();
    let (interfaces, stats) = tokio::join!(
        source.probe("interface", provider.network_interfaces()),
        source.probe("network stats", provider.network_stats()),
    );
    Ok(normalize(interfaces?, &stats?))
}
