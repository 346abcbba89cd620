//! Error types for the telemetry layers

use std::path::PathBuf;
use std::time::Duration;

use mcp_common::{IntoMcpError, McpError};
use serde_json::json;
use thiserror::Error;

/// A single provider probe failed
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0}")]
    Failed(String),

    #[error("{probe} probe timed out after {timeout:?}")]
    Timeout {
        probe: &'static str,
        timeout: Duration,
    },

    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),

    #[error("{probe}: {source}")]
    Io {
        probe: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// A tool-level failure surfaced to callers
#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("metrics aggregation failed: {0}")]
    Aggregation(#[from] tokio::task::JoinError),
}

impl IntoMcpError for ToolError {
    fn into_mcp_error(self) -> McpError {
        let message = self.to_string();
        McpError::internal_error(message.clone(), Some(json!(message)))
    }
}

/// History persistence failure
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to write history to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read history from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("history file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A sampler tick could not produce a snapshot
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("snapshot incomplete: {domain} unavailable ({reason})")]
    Incomplete { domain: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcp_common::ResultExt;

    #[test]
    fn test_tool_error_carries_detail_as_data() {
        let result: Result<(), ToolError> =
            Err(ProviderError::Failed("memory sensor offline".into()).into());
        let err = result.to_mcp_err().unwrap_err();

        assert_eq!(err.code.0, -32603);
        assert_eq!(err.message, "memory sensor offline");
        assert_eq!(err.data, Some(json!("memory sensor offline")));
    }
}
