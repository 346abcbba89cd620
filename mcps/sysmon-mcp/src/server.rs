//! MCP Server implementation for host telemetry

use std::sync::Arc;

use mcp_common::{
    async_trait, json_success, EmbeddableError, EmbeddableMcp, EmbeddableResult, McpError,
    ResultExt,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router,
};
use serde_json::Value;

use crate::monitor::Monitor;
use crate::params::{DiskInfoParams, HistoryParams, ProcessParams};
use crate::types::ErrorObject;

pub const SERVER_NAME: &str = "mcp-system-monitor";

/// Tools in the order `tools/list` advertises them
pub const TOOL_NAMES: [&str; 10] = [
    "get_system_info",
    "get_cpu_info",
    "get_memory_info",
    "get_disk_info",
    "get_network_info",
    "get_processes",
    "get_system_metrics",
    "get_metrics_history",
    "get_battery_info",
    "get_usb_devices",
];

const INSTRUCTIONS: &str = "Host telemetry MCP Server - provides tools for system identity, \
     CPU, memory, disks, network, processes, battery and USB devices, plus a sampled \
     metrics history.";

/// The System Monitor MCP Server
#[derive(Clone)]
pub struct SysMonMcpServer {
    monitor: Arc<Monitor>,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Router Implementation
// ============================================================================

#[tool_router]
impl SysMonMcpServer {
    pub fn new(monitor: Arc<Monitor>) -> Self {
        Self {
            monitor,
            tool_router: Self::tool_router(),
        }
    }

    pub fn monitor(&self) -> &Arc<Monitor> {
        &self.monitor
    }

    #[tool(description = "Get host identity: hostname, OS name and version, kernel, uptime and boot time")]
    async fn get_system_info(&self) -> Result<CallToolResult, McpError> {
        let info = self.monitor.aggregator().system_info().await.to_mcp_err()?;
        json_success(&info)
    }

    #[tool(
        description = "Get CPU information including model, frequency, physical cores, current usage and temperature"
    )]
    async fn get_cpu_info(&self) -> Result<CallToolResult, McpError> {
        let info = self.monitor.aggregator().cpu_info().await.to_mcp_err()?;
        json_success(&info)
    }

    #[tool(description = "Get RAM and swap totals, usage and usage percentages")]
    async fn get_memory_info(&self) -> Result<CallToolResult, McpError> {
        let info = self.monitor.aggregator().memory_info().await.to_mcp_err()?;
        json_success(&info)
    }

    #[tool(
        description = "Get mounted filesystems with total, used and free space, optionally filtered by mount point"
    )]
    async fn get_disk_info(
        &self,
        Parameters(params): Parameters<DiskInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        let disks = self
            .monitor
            .aggregator()
            .disk_info(params.mount_point.as_deref())
            .await
            .to_mcp_err()?;
        json_success(&disks)
    }

    #[tool(description = "Get network interfaces with addresses and traffic counters")]
    async fn get_network_info(&self) -> Result<CallToolResult, McpError> {
        let interfaces = self.monitor.aggregator().network_info().await.to_mcp_err()?;
        json_success(&interfaces)
    }

    #[tool(
        description = "List processes, optionally filtered by name, sorted descending by a field and limited"
    )]
    async fn get_processes(
        &self,
        Parameters(params): Parameters<ProcessParams>,
    ) -> Result<CallToolResult, McpError> {
        let processes = self
            .monitor
            .aggregator()
            .processes(&params.into())
            .await
            .to_mcp_err()?;
        json_success(&processes)
    }

    #[tool(
        description = "Get system, CPU, memory, disk, network and top-process metrics in one call; failed domains are reported inline"
    )]
    async fn get_system_metrics(&self) -> Result<CallToolResult, McpError> {
        match self.monitor.aggregator().get_all_metrics().await {
            Ok(metrics) => json_success(&metrics),
            Err(e) => {
                tracing::error!("Metrics aggregation failed: {}", e);
                json_success(&ErrorObject::new(e.to_string()))
            }
        }
    }

    #[tool(description = "Get the most recent sampled metric snapshots, oldest first (default limit: 60)")]
    async fn get_metrics_history(
        &self,
        Parameters(params): Parameters<HistoryParams>,
    ) -> Result<CallToolResult, McpError> {
        let history = self.monitor.history().query(params.limit()).await;
        json_success(&history)
    }

    #[tool(description = "Get battery presence, charge state, capacity and health")]
    async fn get_battery_info(&self) -> Result<CallToolResult, McpError> {
        json_success(&self.monitor.aggregator().battery_info().await)
    }

    #[tool(description = "List connected USB devices")]
    async fn get_usb_devices(&self) -> Result<CallToolResult, McpError> {
        json_success(&self.monitor.aggregator().usb_devices().await)
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for SysMonMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for SysMonMcpServer {
    fn server_name(&self) -> &str {
        SERVER_NAME
    }

    fn server_version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    fn tool_names(&self) -> Vec<String> {
        TOOL_NAMES.iter().map(|name| name.to_string()).collect()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        match name {
            "get_system_info" => self.get_system_info().await.map_err(Into::into),

            "get_cpu_info" => self.get_cpu_info().await.map_err(Into::into),

            "get_memory_info" => self.get_memory_info().await.map_err(Into::into),

            "get_disk_info" => {
                let params: DiskInfoParams = serde_json::from_value(params)?;
                self.get_disk_info(Parameters(params)).await.map_err(Into::into)
            }

            "get_network_info" => self.get_network_info().await.map_err(Into::into),

            "get_processes" => {
                let params: ProcessParams = serde_json::from_value(params)?;
                self.get_processes(Parameters(params)).await.map_err(Into::into)
            }

            "get_system_metrics" => self.get_system_metrics().await.map_err(Into::into),

            "get_metrics_history" => {
                let params: HistoryParams = serde_json::from_value(params)?;
                self.get_metrics_history(Parameters(params))
                    .await
                    .map_err(Into::into)
            }

            "get_battery_info" => self.get_battery_info().await.map_err(Into::into),

            "get_usb_devices" => self.get_usb_devices().await.map_err(Into::into),

            _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{Aggregator, DEFAULT_SYSTEM_TTL};
    use crate::alerts::AlertEvaluator;
    use crate::history::HistoryStore;
    use crate::provider::fixture::{source, FixtureProvider};
    use crate::provider::RawProcess;
    use mcp_common::text_content;
    use serde_json::json;

    fn server(provider: FixtureProvider) -> SysMonMcpServer {
        let monitor = Monitor::new(
            Aggregator::new(source(provider), DEFAULT_SYSTEM_TTL),
            Arc::new(HistoryStore::in_memory(100)),
            AlertEvaluator::default(),
        );
        SysMonMcpServer::new(Arc::new(monitor))
    }

    async fn call_json(server: &SysMonMcpServer, name: &str, args: Value) -> Value {
        let result = server.call_tool(name, args).await.unwrap();
        serde_json::from_str(&text_content(&result).unwrap()).unwrap()
    }

    #[test]
    fn test_embeddable_server_name() {
        let server = server(FixtureProvider::healthy());
        assert_eq!(server.server_name(), "mcp-system-monitor");
    }

    #[test]
    fn test_embeddable_list_tools() {
        let server = server(FixtureProvider::healthy());
        let tools = server.list_tools();

        assert_eq!(tools.len(), TOOL_NAMES.len());
        let registered: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        for name in TOOL_NAMES {
            assert!(registered.contains(&name), "{} not registered", name);
        }
        assert_eq!(server.tool_names()[0], "get_system_info");
    }

    #[tokio::test]
    async fn test_get_system_info() {
        let server = server(FixtureProvider::healthy());
        let info = call_json(&server, "get_system_info", json!({})).await;

        assert_eq!(info["hostname"], "fixture-host");
        assert_eq!(info["boot_time"], "2023-11-14T22:13:20.000Z");
    }

    #[tokio::test]
    async fn test_get_disk_info_filter() {
        let server = server(FixtureProvider::healthy());
        let disks = call_json(&server, "get_disk_info", json!({"mountPoint": "/home"})).await;

        let disks = disks.as_array().unwrap();
        assert_eq!(disks.len(), 1);
        assert_eq!(disks[0]["mount_point"], "/home");
    }

    #[tokio::test]
    async fn test_get_processes_query() {
        let processes = [(1, "chrome", 10.0), (2, "chrome", 50.0), (3, "bash", 90.0), (4, "chrome", 30.0)]
            .into_iter()
            .map(|(pid, name, cpu)| RawProcess {
                pid,
                name: name.into(),
                cpu_percent: cpu,
                ..Default::default()
            })
            .collect();
        let server = server(FixtureProvider {
            processes: Some(processes),
            ..FixtureProvider::healthy()
        });

        let result = call_json(
            &server,
            "get_processes",
            json!({"name": "chrome", "sortBy": "cpu_usage", "limit": 2}),
        )
        .await;

        let pids: Vec<u64> = result
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["pid"].as_u64().unwrap())
            .collect();
        assert_eq!(pids, vec![2, 4]);
    }

    #[tokio::test]
    async fn test_single_domain_failure_is_tool_error() {
        let server = server(FixtureProvider {
            memory: None,
            ..FixtureProvider::healthy()
        });
        let result = server.call_tool("get_memory_info", json!({})).await;

        match result {
            Err(EmbeddableError::ToolFailed(message)) => assert_eq!(message, "memory probe failed"),
            other => panic!("expected tool failure, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_system_metrics_inline_errors() {
        let server = server(FixtureProvider {
            interfaces: None,
            ..FixtureProvider::healthy()
        });
        let metrics = call_json(&server, "get_system_metrics", json!({})).await;

        assert_eq!(metrics["networks"], json!({"error": "interface probe failed"}));
        assert_eq!(metrics["memory_info"]["total"], 16000);
    }

    #[tokio::test]
    async fn test_metrics_history_after_sample() {
        let server = server(FixtureProvider::healthy());
        server.monitor().sample_once().await.unwrap();

        let history = call_json(&server, "get_metrics_history", json!({"limit": 5})).await;
        let history = history.as_array().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["cpu_usage"], 35.0);
    }

    #[tokio::test]
    async fn test_battery_failure_is_inline() {
        let server = server(FixtureProvider {
            battery: None,
            ..FixtureProvider::healthy()
        });
        let battery = call_json(&server, "get_battery_info", json!({})).await;
        assert_eq!(battery, json!({"error": "battery probe failed"}));
    }

    #[tokio::test]
    async fn test_embeddable_unknown_tool() {
        let server = server(FixtureProvider::healthy());
        let result = server.call_tool("nonexistent_tool", json!({})).await;

        assert!(matches!(result, Err(EmbeddableError::ToolNotFound(_))));
    }
}
