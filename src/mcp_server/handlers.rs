//! MCP Request Handlers
//!
//! Routes JSON-RPC methods to a `ToolDispatcher`: initialization, tool
//! listing and tool calls. Resources and prompts are answered with empty
//! lists.

use crate::mcp_server::{
    tools::{
        prompts_list_result, resources_list_result, text_content_result, tools_list_result, Tool,
    },
    transport::{create_error_response, create_success_response},
};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

/// JSON-RPC error codes used by the handlers
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

/// What the protocol layer needs from a server
pub trait ToolDispatcher: Send + Sync {
    fn server_name(&self) -> &str;

    fn server_version(&self) -> &str;

    fn server_description(&self) -> &str;

    fn list_tools(&self) -> Vec<Tool>;

    /// Execute a tool call. Failures are reported inside the returned response.
    fn call_tool(&self, name: &str, arguments: &Value) -> Value;
}

/// MCP request handlers
pub struct MCPHandlers<'a> {
    dispatcher: &'a dyn ToolDispatcher,
    protocol_version: String,
}

impl<'a> MCPHandlers<'a> {
    pub fn new(dispatcher: &'a dyn ToolDispatcher, protocol_version: impl Into<String>) -> Self {
        Self {
            dispatcher,
            protocol_version: protocol_version.into(),
        }
    }

    /// Handle an incoming MCP request
    pub fn handle_request(
        &self,
        method: &str,
        params: Option<&Value>,
        id: Option<&Value>,
    ) -> Value {
        debug!("Handling MCP request: {}", method);

        match method {
            "initialize" => self.handle_initialize(id),
            "ping" => create_success_response(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, params),
            "resources/list" => create_success_response(id, resources_list_result()),
            "prompts/list" => create_success_response(id, prompts_list_result()),
            _ => {
                warn!("Unknown method: {}", method);
                create_error_response(id, METHOD_NOT_FOUND, "Method not found")
            }
        }
    }

    /// Server information and capabilities for `initialize`
    pub fn server_capabilities(&self) -> Value {
        json!({
            "protocolVersion": self.protocol_version,
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            },
            "serverInfo": {
                "name": self.dispatcher.server_name(),
                "version": self.dispatcher.server_version()
            },
            "instructions": self.dispatcher.server_description()
        })
    }

    fn handle_initialize(&self, id: Option<&Value>) -> Value {
        info!("{} MCP server initializing", self.dispatcher.server_name());
        create_success_response(id, self.server_capabilities())
    }

    fn handle_tools_list(&self, id: Option<&Value>) -> Value {
        debug!("Listing available tools");
        create_success_response(id, tools_list_result(&self.dispatcher.list_tools()))
    }

    fn handle_tools_call(&self, id: Option<&Value>, params: Option<&Value>) -> Value {
        let params = match params {
            Some(p) => p,
            None => {
                return create_error_response(id, INVALID_PARAMS, "Missing params");
            }
        };

        let tool_name = match params.get("name").and_then(|n| n.as_str()) {
            Some(name) => name,
            None => {
                return create_error_response(id, INVALID_PARAMS, "Missing tool name");
            }
        };

        let arguments = match params.get("arguments") {
            Some(Value::Null) | None => json!({}),
            Some(args @ Value::Object(_)) => args.clone(),
            Some(_) => {
                return create_error_response(id, INVALID_PARAMS, "Arguments must be an object");
            }
        };

        debug!("Executing tool: {} with args: {}", tool_name, arguments);
        let response = self.dispatcher.call_tool(tool_name, &arguments);
        create_success_response(id, text_content_result(&response))
    }
}
