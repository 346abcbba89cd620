//! MCP Common - shared protocol plumbing for MCP servers
//!
//! - **Dispatch**: [`Dispatcher`] validates JSON-RPC envelopes and routes them to an
//!   [`EmbeddableMcp`] server, for transports that are not driven by rmcp itself (HTTP)
//! - **Errors**: JSON-RPC error codes and conversions into rmcp errors
//! - **Results**: helpers for building and unwrapping `CallToolResult` text content
//! - **Init**: tracing setup that keeps stdout free for the stdio protocol
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mcp_common::Dispatcher;
//!
//! let dispatcher = Dispatcher::new(Arc::new(MyServer::new()));
//! let response = dispatcher
//!     .handle(serde_json::json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}))
//!     .await;
//! assert!(response.error.is_none());
//! ```

pub mod dispatcher;
pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;

pub use dispatcher::{Dispatcher, JsonRpcResponse, PROTOCOL_VERSION};
pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::{IntoMcpError, JsonRpcError, ResultExt};
pub use init::{init_tracing, LogFormat};
pub use result::{json_success, text_content, tool_content};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing EmbeddableMcp
pub use async_trait::async_trait;
