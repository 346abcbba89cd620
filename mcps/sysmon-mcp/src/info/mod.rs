//! Normalizers: raw provider facts into the stable output schema
//!
//! Each domain has a pure `normalize` function plus an async fetcher that runs the
//! provider probes through a [`FactSource`](crate::provider::FactSource).

pub mod battery;
pub mod cpu;
pub mod disk;
pub mod memory;
pub mod network;
pub mod process;
pub mod system;
pub mod usb;

use chrono::{DateTime, SecondsFormat, Utc};

/// ISO-8601 with millisecond precision and a `Z` suffix
pub fn iso_millis(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Percentage of `part` in `whole`, 0 when `whole` is 0
pub(crate) fn percent(part: u64, whole: u64) -> f64 {
    if whole > 0 {
        (part as f64 / whole as f64) * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_millis() {
        let instant = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        assert_eq!(iso_millis(instant), "2023-11-14T22:13:20.000Z");
    }

    #[test]
    fn test_percent_guards_zero() {
        assert_eq!(percent(5, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }
}
