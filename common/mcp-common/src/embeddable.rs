//! In-process tool execution
//!
//! [`EmbeddableMcp`] lets a server's tools be called directly, without an rmcp
//! transport in between. The HTTP dispatcher is built on top of it.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

/// Error type for embeddable MCP operations
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    /// Tool was not found in the server
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// Arguments did not match the tool's input schema
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    /// Tool execution failed
    #[error("{0}")]
    ToolFailed(String),
}

impl From<rmcp::ErrorData> for EmbeddableError {
    fn from(err: rmcp::ErrorData) -> Self {
        EmbeddableError::ToolFailed(err.message.to_string())
    }
}

/// Result type for embeddable MCP operations
pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// An MCP server whose tools can be called in-process
///
/// Implementations must be `Send + Sync`; tool calls arrive concurrently from
/// independent request handlers.
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Server name reported in `initialize`
    fn server_name(&self) -> &str;

    /// Server version reported in `initialize`
    fn server_version(&self) -> &str {
        "0.1.0"
    }

    /// All tools with their input schemas
    fn list_tools(&self) -> Vec<Tool>;

    /// Tool names in the order they should be advertised
    fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .list_tools()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        names
    }

    /// Execute a tool by name with JSON arguments
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;
}
