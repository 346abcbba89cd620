//! Result helpers for MCP tool responses

use rmcp::{
    model::{CallToolResult, Content, RawContent},
    ErrorData as McpError,
};
use serde::Serialize;
use serde_json::{json, Value};

/// Create a successful response holding `data` as pretty-printed JSON text
pub fn json_success<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Concatenate the text parts of a tool result
///
/// Returns `None` when the result carries no text content at all.
pub fn text_content(result: &CallToolResult) -> Option<String> {
    let parts: Vec<&str> = result
        .content
        .iter()
        .filter_map(|content| match &content.raw {
            RawContent::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

/// Wire shape of a tool result: `{content: [{type: "text", text}]}`
pub fn tool_content(text: impl Into<String>) -> Value {
    json!({
        "content": [
            {
                "type": "text",
                "text": text.into(),
            }
        ]
    })
}
