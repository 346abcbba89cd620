//! Process normalization, filtering and ranking

use chrono::DateTime;

use super::iso_millis;
use crate::error::ToolError;
use crate::provider::{FactSource, RawProcess};
use crate::types::ProcessInfo;

/// Filter, sort and limit applied to a process listing, in that order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessQuery {
    /// Case-insensitive substring of the process name
    pub name: Option<String>,
    /// Field to sort by, descending
    pub sort_by: Option<String>,
    pub limit: Option<usize>,
}

impl ProcessQuery {
    /// The fixed "top processes" policy used by the aggregate snapshot
    pub fn top_by_cpu(limit: usize) -> Self {
        Self {
            name: None,
            sort_by: Some("cpu_usage".to_string()),
            limit: Some(limit),
        }
    }

    pub fn apply(&self, mut processes: Vec<ProcessInfo>) -> Vec<ProcessInfo> {
        if let Some(name) = &self.name {
            let needle = name.to_lowercase();
            processes.retain(|p| p.name.to_lowercase().contains(&needle));
        }

        if let Some(field) = &self.sort_by {
            processes.sort_by(|a, b| b.sort_value(field).total_cmp(&a.sort_value(field)));
        }

        if let Some(limit) = self.limit {
            processes.truncate(limit);
        }

        processes
    }
}

pub fn normalize(p: RawProcess) -> ProcessInfo {
    let start_time = DateTime::from_timestamp(p.started_secs as i64, 0)
        .map(iso_millis)
        .unwrap_or_default();

    ProcessInfo {
        pid: p.pid,
        name: p.name,
        command: p.command,
        cpu_usage: p.cpu_percent,
        memory_usage: p.memory_bytes,
        memory_usage_percent: p.memory_percent,
        status: p.status,
        start_time,
        user: p.user,
        priority: p.priority,
    }
}

pub async fn get_processes(
    source: &FactSource,
    query: &ProcessQuery,
) -> Result<Vec<ProcessInfo>, ToolError> {
    let raw = source.probe("process", source.provider().processes()).await?;
    let mut processes: Vec<ProcessInfo> = raw.into_iter().map(normalize).collect();
    processes.sort_by_key(|p| p.pid);
    Ok(query.apply(processes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(pid: u32, name: &str, cpu: f32) -> ProcessInfo {
        normalize(RawProcess {
            pid,
            name: name.to_string(),
            command: format!("/usr/bin/{}", name),
            cpu_percent: cpu,
            memory_bytes: u64::from(pid) * 1024,
            status: "Run".into(),
            started_secs: 1_700_000_000,
            ..Default::default()
        })
    }

    fn fixture() -> Vec<ProcessInfo> {
        vec![
            process(1, "chrome", 10.0),
            process(2, "systemd", 90.0),
            process(3, "Chrome Helper", 50.0),
            process(4, "bash", 70.0),
            process(5, "chrome_crashpad", 30.0),
        ]
    }

    #[test]
    fn test_filter_sort_limit() {
        let query = ProcessQuery {
            name: Some("chrome".into()),
            sort_by: Some("cpu_usage".into()),
            limit: Some(2),
        };
        let result = query.apply(fixture());

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].cpu_usage, 50.0);
        assert_eq!(result[1].cpu_usage, 30.0);
    }

    #[test]
    fn test_name_filter_is_case_insensitive() {
        let query = ProcessQuery {
            name: Some("CHROME".into()),
            ..Default::default()
        };
        assert_eq!(query.apply(fixture()).len(), 3);
    }

    #[test]
    fn test_unknown_sort_field_keeps_order() {
        let query = ProcessQuery {
            sort_by: Some("threads".into()),
            ..Default::default()
        };
        let pids: Vec<u32> = query.apply(fixture()).iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_missing_priority_sorts_as_zero() {
        let mut procs = fixture();
        procs[0].priority = Some(20);
        procs[1].priority = Some(-5);

        let query = ProcessQuery {
            sort_by: Some("priority".into()),
            ..Default::default()
        };
        let pids: Vec<u32> = query.apply(procs).iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![1, 3, 4, 5, 2]);
    }

    #[test]
    fn test_limit_without_sort() {
        let query = ProcessQuery {
            limit: Some(3),
            ..Default::default()
        };
        assert_eq!(query.apply(fixture()).len(), 3);
    }

    #[test]
    fn test_top_by_cpu() {
        let top = ProcessQuery::top_by_cpu(2).apply(fixture());
        let names: Vec<&str> = top.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["systemd", "bash"]);
    }

    #[test]
    fn test_start_time_is_iso() {
        assert_eq!(fixture()[0].start_time, "2023-11-14T22:13:20.000Z");
    }
}
