//! System Monitor MCP Server
//!
//! Host telemetry tools via MCP over stdio (default) or HTTP/SSE (`--http`).
//! A background sampler records metric snapshots into a persisted history and logs
//! threshold alerts.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use rmcp::{transport::io::stdio, ServiceExt};

use sysmon_mcp::{
    Aggregator, AlertEvaluator, Config, FactSource, HistoryStore, Monitor, Sampler,
    SysMonMcpServer, SysinfoProvider,
};

#[tokio::main]
async fn main() -> Result<()> {
    mcp_common::init_tracing("sysmon_mcp")?;

    let config = Config::parse();

    let source = FactSource::new(Arc::new(SysinfoProvider::new()), config.provider_timeout());
    let aggregator = Aggregator::new(source, config.cache_ttl());

    let history = match config.history_path() {
        Some(path) => HistoryStore::new(path, config.history_size),
        None => {
            tracing::warn!("No data directory available, history will not be persisted");
            HistoryStore::in_memory(config.history_size)
        }
    };
    match history.path() {
        Some(path) => tracing::info!(
            "History: {} (keeping {} snapshots)",
            path.display(),
            history.capacity()
        ),
        None => tracing::info!("History: in memory (keeping {} snapshots)", history.capacity()),
    }
    history.load().await;

    let monitor = Arc::new(Monitor::new(
        aggregator,
        Arc::new(history),
        AlertEvaluator::new(config.thresholds()),
    ));

    tracing::info!("Alert thresholds: {:?}", monitor.alerts().thresholds());

    let sampler = if config.no_sampler {
        tracing::info!("Background sampler disabled");
        None
    } else {
        Some(Sampler::new(monitor.clone(), config.sample_interval()).spawn())
    };

    let server = SysMonMcpServer::new(monitor);

    let outcome = if config.http {
        sysmon_mcp::http::serve(server, config.http_config()).await
    } else {
        tracing::info!("Starting System Monitor MCP server on stdio");
        serve_stdio(server).await
    };

    if let Some(sampler) = sampler {
        sampler.stop().await;
    }

    outcome
}

async fn serve_stdio(server: SysMonMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");

    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
