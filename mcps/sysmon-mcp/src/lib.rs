//! System Monitor MCP Library
//!
//! Host telemetry tools via MCP: system identity, CPU, memory, disks, network,
//! processes, battery and USB devices, plus a periodically sampled metrics history
//! with threshold alerts.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use sysmon_mcp::{Aggregator, AlertEvaluator, FactSource, HistoryStore, Monitor, SysMonMcpServer, SysinfoProvider};
//!
//! let source = FactSource::new(Arc::new(SysinfoProvider::new()), Duration::from_secs(10));
//! let monitor = Monitor::new(
//!     Aggregator::new(source, Duration::from_secs(60)),
//!     Arc::new(HistoryStore::in_memory(1440)),
//!     AlertEvaluator::default(),
//! );
//! let server = SysMonMcpServer::new(Arc::new(monitor));
//! ```
//!
//! # Usage as Binary
//!
//! Run directly: `sysmon-mcp` (stdio) or `sysmon-mcp --http` (HTTP/SSE on port 57996)
//!
//! Or configure in `.mcp.json`:
//! ```json
//! { "mcpServers": { "sysmon": { "command": "./sysmon-mcp" } } }
//! ```

pub mod aggregator;
pub mod alerts;
pub mod cache;
pub mod config;
pub mod error;
pub mod history;
pub mod http;
pub mod info;
pub mod monitor;
pub mod params;
pub mod provider;
pub mod sampler;
pub mod server;
pub mod types;

// Re-export main server type
pub use server::SysMonMcpServer;

// Re-export the component graph
pub use aggregator::Aggregator;
pub use alerts::{AlertEvaluator, Thresholds};
pub use config::Config;
pub use history::HistoryStore;
pub use monitor::Monitor;
pub use provider::{FactProvider, FactSource, SysinfoProvider};
pub use sampler::{Sampler, SamplerHandle};

// Re-export parameter types for direct API usage
pub use params::{DiskInfoParams, HistoryParams, ProcessParams};

// Re-export EmbeddableMcp trait for in-process usage
pub use mcp_common::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
