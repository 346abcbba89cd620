//! Threshold alerts over sampled snapshots

use serde::{Deserialize, Serialize};

use crate::types::MetricSnapshot;

/// Alert limits, in percent (usage) and degrees Celsius (temperature)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
    pub temperature: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cpu: 90.0,
            memory: 90.0,
            disk: 90.0,
            temperature: 80.0,
        }
    }
}

/// Alert messages for every limit the snapshot exceeds
///
/// Order: CPU, memory, temperature, then disks as listed. A value equal to its
/// limit does not alert.
pub fn evaluate(snapshot: &MetricSnapshot, thresholds: &Thresholds) -> Vec<String> {
    let mut alerts = Vec::new();

    if snapshot.cpu_usage > thresholds.cpu {
        alerts.push(format!(
            "CPU usage at {:.1}% exceeds {:.1}%",
            snapshot.cpu_usage, thresholds.cpu
        ));
    }

    if snapshot.memory_usage > thresholds.memory {
        alerts.push(format!(
            "Memory usage at {:.1}% exceeds {:.1}%",
            snapshot.memory_usage, thresholds.memory
        ));
    }

    if let Some(temp) = snapshot.temperature {
        if temp > thresholds.temperature {
            alerts.push(format!(
                "CPU temperature at {:.1}°C exceeds {:.1}°C",
                temp, thresholds.temperature
            ));
        }
    }

    for disk in &snapshot.disks {
        if disk.usage > thresholds.disk {
            alerts.push(format!(
                "Disk {} usage at {:.1}% exceeds {:.1}%",
                disk.mount, disk.usage, thresholds.disk
            ));
        }
    }

    alerts
}

/// Logs one warning line per snapshot that breaches any limit
#[derive(Debug, Clone, Default)]
pub struct AlertEvaluator {
    thresholds: Thresholds,
}

impl AlertEvaluator {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn check(&self, snapshot: &MetricSnapshot) -> Vec<String> {
        let alerts = evaluate(snapshot, &self.thresholds);
        if !alerts.is_empty() {
            tracing::warn!("ALERT: {}", alerts.join(" | "));
        }
        alerts
    }
}
