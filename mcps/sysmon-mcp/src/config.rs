//! Command-line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::aggregator::DEFAULT_SYSTEM_TTL;
use crate::alerts::Thresholds;
use crate::history::DEFAULT_CAPACITY;
use crate::http::{HttpConfig, DEFAULT_PORT};
use crate::provider::DEFAULT_PROBE_TIMEOUT;
use crate::sampler::DEFAULT_INTERVAL;

#[derive(Debug, Clone, Parser)]
#[command(name = "sysmon-mcp")]
#[command(about = "Host telemetry MCP server with sampled history and threshold alerts")]
pub struct Config {
    /// Serve over HTTP/SSE instead of stdio
    #[arg(long, env = "MCP_HTTP")]
    pub http: bool,

    /// HTTP listening port
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Require this key (x-api-key header or apiKey query) on HTTP requests
    #[arg(long, env = "MCP_API_KEY")]
    pub api_key: Option<String>,

    /// History file (default: <data dir>/sysmon-mcp/history.json)
    #[arg(long, env = "MCP_HISTORY_PATH")]
    pub history_path: Option<PathBuf>,

    /// Number of snapshots kept in history
    #[arg(long, env = "MCP_HISTORY_SIZE", default_value_t = DEFAULT_CAPACITY)]
    pub history_size: usize,

    /// Seconds between background samples
    #[arg(long, env = "MCP_SAMPLE_INTERVAL", default_value_t = DEFAULT_INTERVAL.as_secs())]
    pub sample_interval: u64,

    /// Do not start the background sampler
    #[arg(long, env = "MCP_DISABLE_SAMPLER")]
    pub no_sampler: bool,

    /// Seconds system identity facts stay cached
    #[arg(long, env = "MCP_CACHE_TTL", default_value_t = DEFAULT_SYSTEM_TTL.as_secs())]
    pub cache_ttl: u64,

    /// Seconds before a single provider probe is abandoned
    #[arg(long, env = "MCP_PROVIDER_TIMEOUT", default_value_t = DEFAULT_PROBE_TIMEOUT.as_secs())]
    pub provider_timeout: u64,

    /// CPU usage alert threshold, percent
    #[arg(long, env = "MCP_CPU_THRESHOLD", default_value_t = 90.0)]
    pub cpu_threshold: f64,

    /// Memory usage alert threshold, percent
    #[arg(long, env = "MCP_MEMORY_THRESHOLD", default_value_t = 90.0)]
    pub memory_threshold: f64,

    /// Disk usage alert threshold, percent
    #[arg(long, env = "MCP_DISK_THRESHOLD", default_value_t = 90.0)]
    pub disk_threshold: f64,

    /// CPU temperature alert threshold, Celsius
    #[arg(long, env = "MCP_TEMPERATURE_THRESHOLD", default_value_t = 80.0)]
    pub temperature_threshold: f64,
}

impl Config {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            cpu: self.cpu_threshold,
            memory: self.memory_threshold,
            disk: self.disk_threshold,
            temperature: self.temperature_threshold,
        }
    }

    /// Configured history path, else the per-user default; `None` when no data dir exists
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_path.clone().or_else(default_history_path)
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_secs(self.sample_interval.max(1))
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout.max(1))
    }

    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            port: self.port,
            api_key: self.api_key.clone().filter(|key| !key.is_empty()),
        }
    }
}

/// `<data dir>/sysmon-mcp/history.json`
pub fn default_history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("sysmon-mcp").join("history.json"))
}
