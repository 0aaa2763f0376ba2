//! Tool descriptors and MCP result shaping
//!
//! Servers advertise their tools as `Tool` values; this module turns them
//! into `tools/list` results and wraps tool responses as MCP text content.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A tool advertised by a server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl Tool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }

    /// A tool that accepts no arguments
    pub fn no_arguments(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(
            name,
            description,
            json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        )
    }
}

/// Build the `tools/list` result
pub fn tools_list_result(tools: &[Tool]) -> Value {
    json!({
        "tools": tools
    })
}

/// Wrap a tool response as MCP text content
pub fn text_content_result(response: &Value) -> Value {
    let text = serde_json::to_string_pretty(response).unwrap_or_else(|_| response.to_string());
    json!({
        "content": [
            {
                "type": "text",
                "text": text
            }
        ]
    })
}

/// Get empty resources list (tools-only servers expose no resources)
pub fn resources_list_result() -> Value {
    json!({
        "resources": []
    })
}

/// Get empty prompts list
pub fn prompts_list_result() -> Value {
    json!({
        "prompts": []
    })
}
