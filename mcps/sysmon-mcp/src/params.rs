//! Parameter types for System Monitor MCP tools

use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};

use crate::history::DEFAULT_QUERY_LIMIT;
use crate::info::process::ProcessQuery;
use crate::types::ProcessInfo;

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiskInfoParams {
    #[schemars(description = "Only include disks whose mount point contains this text (case-sensitive)")]
    #[serde(default, alias = "mount_point")]
    pub mount_point: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessParams {
    #[schemars(description = "Only include processes whose name contains this text (case-insensitive)")]
    #[serde(default)]
    pub name: Option<String>,

    #[schemars(schema_with = "sort_by_schema")]
    #[serde(default, alias = "sort_by")]
    pub sort_by: Option<String>,

    #[schemars(description = "Maximum number of processes to return")]
    #[serde(default)]
    pub limit: Option<usize>,
}

fn sort_by_schema(_: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "type": "string",
        "enum": ProcessInfo::SORT_FIELDS,
        "description": "Sort descending by this field",
    })
}

impl From<ProcessParams> for ProcessQuery {
    fn from(params: ProcessParams) -> Self {
        ProcessQuery {
            name: params.name,
            sort_by: params.sort_by,
            limit: params.limit,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct HistoryParams {
    #[schemars(description = "Number of most recent snapshots to return (default: 60)")]
    #[serde(default)]
    pub limit: Option<usize>,
}

impl HistoryParams {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_QUERY_LIMIT)
    }
}
