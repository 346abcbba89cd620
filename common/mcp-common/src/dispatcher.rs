//! JSON-RPC request dispatcher
//!
//! Each request moves RECEIVED → VALIDATED → ROUTED → RESULT | ERROR:
//!
//! - body is not JSON → `-32700`
//! - not an object, `jsonrpc != "2.0"`, or no `method` → `-32600`
//! - method outside `initialize`, `tools/list`, `tools/call` → `-32601`
//! - anything failing inside a known method → `-32603`, failure message in `data`
//!
//! Tool results go out as `{content: [{type: "text", text}]}` with the tool's
//! pretty-printed JSON as the text.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::embeddable::{EmbeddableError, EmbeddableMcp};
use crate::error::JsonRpcError;
use crate::result::{text_content, tool_content};

/// MCP protocol revision advertised by `initialize`
pub const PROTOCOL_VERSION: &str = "2025-06-18";

const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    /// HTTP status matching the outcome (200 on success)
    pub fn http_status(&self) -> u16 {
        self.error.as_ref().map(JsonRpcError::http_status).unwrap_or(200)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ToolCallParams {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    arguments: Option<Value>,
}

/// Routes JSON-RPC requests to an [`EmbeddableMcp`] server
pub struct Dispatcher<S: ?Sized> {
    server: Arc<S>,
}

impl<S: ?Sized> Clone for Dispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            server: Arc::clone(&self.server),
        }
    }
}

impl<S: EmbeddableMcp + ?Sized> Dispatcher<S> {
    pub fn new(server: Arc<S>) -> Self {
        Self { server }
    }

    /// Handle a raw request body
    pub async fn handle_bytes(&self, body: &[u8]) -> JsonRpcResponse {
        match serde_json::from_slice::<Value>(body) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                tracing::debug!("Rejecting unparseable request body: {}", e);
                JsonRpcResponse::failure(Value::Null, JsonRpcError::parse_error(e.to_string()))
            }
        }
    }

    /// Handle an already-parsed request
    pub async fn handle(&self, request: Value) -> JsonRpcResponse {
        let id = request.get("id").cloned().unwrap_or(Value::Null);

        let version_ok = request.get("jsonrpc").and_then(Value::as_str) == Some(JSONRPC_VERSION);
        let method = request
            .get("method")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty());

        let Some(method) = method.filter(|_| version_ok) else {
            tracing::debug!("Invalid request envelope (id={})", id);
            return JsonRpcResponse::failure(id, JsonRpcError::invalid_request());
        };

        let params = request.get("params").cloned().unwrap_or(Value::Null);

        let outcome = match method {
            "initialize" => Ok(self.initialize()),
            "tools/list" => Ok(self.tools_list()),
            "tools/call" => self.tools_call(params).await,
            other => {
                tracing::debug!("Method not found: {}", other);
                return JsonRpcResponse::failure(id, JsonRpcError::method_not_found());
            }
        };

        match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                tracing::warn!("{} failed: {}", method, e);
                JsonRpcResponse::failure(id, JsonRpcError::internal(e.to_string()))
            }
        }
    }

    fn initialize(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {},
            },
            "serverInfo": {
                "name": self.server.server_name(),
                "version": self.server.server_version(),
            },
        })
    }

    fn tools_list(&self) -> Value {
        json!({
            "content": [
                {
                    "type": "tool-list",
                    "tools": self.server.tool_names(),
                }
            ]
        })
    }

    async fn tools_call(&self, params: Value) -> Result<Value, EmbeddableError> {
        let params: ToolCallParams = if params.is_null() {
            ToolCallParams::default()
        } else {
            serde_json::from_value(params)?
        };

        let name = params
            .name
            .ok_or_else(|| EmbeddableError::ToolNotFound(String::new()))?;
        let arguments = match params.arguments {
            Some(Value::Null) | None => json!({}),
            Some(args) => args,
        };

        let result = self.server.call_tool(&name, arguments).await?;
        let text = text_content(&result).unwrap_or_default();

        if result.is_error.unwrap_or(false) {
            return Err(EmbeddableError::ToolFailed(text));
        }

        Ok(tool_content(text))
    }
}
