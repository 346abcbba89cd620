//! System identity normalization

use chrono::{DateTime, Utc};

use super::iso_millis;
use crate::error::ToolError;
use crate::provider::{FactSource, RawOsInfo, RawTime};
use crate::types::SystemInfo;

/// Boot instant as ISO-8601
///
/// In order of preference: the provider's boot epoch, `current - uptime`, then `now`.
pub fn boot_time(time: &RawTime, now: DateTime<Utc>) -> String {
    let derived = if time.boot_time_secs != 0 {
        (time.boot_time_secs as i64)
            .checked_mul(1000)
            .and_then(DateTime::from_timestamp_millis)
    } else if time.current_ms != 0 && time.uptime_secs != 0 {
        (time.uptime_secs as i64)
            .checked_mul(1000)
            .and_then(|uptime_ms| time.current_ms.checked_sub(uptime_ms))
            .and_then(DateTime::from_timestamp_millis)
    } else {
        None
    };

    iso_millis(derived.unwrap_or(now))
}

pub fn normalize(os: RawOsInfo, time: &RawTime, now: DateTime<Utc>) -> SystemInfo {
    SystemInfo {
        hostname: os.hostname,
        os_name: os.distro,
        os_version: os.release,
        kernel_version: os.kernel,
        uptime: time.uptime_secs,
        boot_time: boot_time(time, now),
    }
}

/// Fetch system identity (uncached; see [`crate::aggregator::Aggregator::system_info`])
pub async fn get_system_info(source: &FactSource) -> Result<SystemInfo, ToolError> {
    let os = source.probe("os", source.provider().os_info()).await?;
    let time = source.provider().time();
    Ok(normalize(os, &time, Utc::now()))
}
