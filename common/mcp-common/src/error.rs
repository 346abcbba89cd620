//! Error types shared by MCP servers
//!
//! Two families live here: the JSON-RPC error object returned by [`crate::Dispatcher`],
//! and conversions that let tool implementations bubble domain errors into rmcp's
//! `ErrorData` with `?`.

use rmcp::ErrorData as McpError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Invalid JSON was received
pub const PARSE_ERROR: i32 = -32700;
/// The JSON sent is not a valid request object
pub const INVALID_REQUEST: i32 = -32600;
/// The method does not exist
pub const METHOD_NOT_FOUND: i32 = -32601;
/// Any failure while running a known method
pub const INTERNAL_ERROR: i32 = -32603;

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{message} ({code})")]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn parse_error(detail: impl Into<String>) -> Self {
        Self {
            code: PARSE_ERROR,
            message: "Parse error".to_string(),
            data: Some(Value::String(detail.into())),
        }
    }

    pub fn invalid_request() -> Self {
        Self {
            code: INVALID_REQUEST,
            message: "Invalid Request".to_string(),
            data: None,
        }
    }

    pub fn method_not_found() -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: "Method not found".to_string(),
            data: None,
        }
    }

    /// Internal error carrying the underlying failure message as `data`
    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message: "Internal error".to_string(),
            data: Some(Value::String(detail.into())),
        }
    }

    /// HTTP status an HTTP transport should answer with for this error
    pub fn http_status(&self) -> u16 {
        match self.code {
            PARSE_ERROR | INVALID_REQUEST => 400,
            METHOD_NOT_FOUND => 404,
            _ => 500,
        }
    }
}

/// Trait for converting errors into MCP-compatible errors
///
/// Implement this for domain error types so tool methods can use `.to_mcp_err()?`.
pub trait IntoMcpError {
    /// Convert this error into an MCP error
    fn into_mcp_error(self) -> McpError;
}

/// Extension trait for Result types to convert to MCP errors
pub trait ResultExt<T> {
    /// Convert the error to an MCP error
    fn to_mcp_err(self) -> Result<T, McpError>;
}

impl<T, E: IntoMcpError> ResultExt<T> for Result<T, E> {
    fn to_mcp_err(self) -> Result<T, McpError> {
        self.map_err(|e| e.into_mcp_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_map_to_http_status() {
        assert_eq!(JsonRpcError::parse_error("eof").http_status(), 400);
        assert_eq!(JsonRpcError::invalid_request().http_status(), 400);
        assert_eq!(JsonRpcError::method_not_found().http_status(), 404);
        assert_eq!(JsonRpcError::internal("boom").http_status(), 500);
    }

    #[test]
    fn test_internal_error_carries_detail() {
        let err = JsonRpcError::internal("disk probe failed");
        assert_eq!(err.code, INTERNAL_ERROR);
        assert_eq!(err.message, "Internal error");
        assert_eq!(err.data, Some(Value::String("disk probe failed".into())));
    }

    #[test]
    fn test_data_omitted_when_absent() {
        let json = serde_json::to_value(JsonRpcError::method_not_found()).unwrap();
        assert_eq!(json, serde_json::json!({"code": -32601, "message": "Method not found"}));
    }

    struct SensorGone;

    impl IntoMcpError for SensorGone {
        fn into_mcp_error(self) -> McpError {
            McpError::internal_error("sensor gone", None)
        }
    }

    #[test]
    fn test_result_ext() {
        let result: Result<(), SensorGone> = Err(SensorGone);
        let err = result.to_mcp_err().unwrap_err();
        assert_eq!(err.message, "sensor gone");

        let ok: Result<u8, SensorGone> = Ok(7);
        assert_eq!(ok.to_mcp_err().unwrap(), 7);
    }
}
