//! Example MCP server built on the base framework.
//!
//! Routes tool calls through a `ToolRouter` and maps argument errors to
//! structured responses. Run `greeter --health-check` to probe it.

use anyhow::Result;
use mcp_server_base::{
    error_response, success_response, ErrorHandler, McpServer, RuntimeConfig, ServerError,
    ServerRunner, Tool, ToolRouter,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::process::ExitCode;
use tracing::info;

#[derive(Deserialize)]
struct GreetArgs {
    name: String,
    #[serde(default = "default_greeting")]
    greeting: String,
}

fn default_greeting() -> String {
    "Hello".to_string()
}

#[derive(Deserialize)]
struct AddArgs {
    a: f64,
    b: f64,
}

struct GreeterServer {
    router: ToolRouter,
}

impl GreeterServer {
    fn new() -> Result<Self> {
        let mut router = ToolRouter::new();
        router
            .register("greet", |args: GreetArgs| {
                Ok(success_response([(
                    "message",
                    json!(format!("{}, {}!", args.greeting, args.name)),
                )]))
            })?
            .register("add", |args: AddArgs| {
                Ok(success_response([("result", json!(args.a + args.b))]))
            })?;
        Ok(Self { router })
    }
}

impl McpServer for GreeterServer {
    fn server_name(&self) -> &str {
        "greeter"
    }

    fn server_description(&self) -> &str {
        "Greets people and adds numbers"
    }

    fn get_tools(&self) -> Vec<Tool> {
        vec![
            Tool::new(
                "greet",
                "Greet someone by name",
                json!({
                    "type": "object",
                    "properties": {
                        "name": {"type": "string", "description": "Who to greet"},
                        "greeting": {"type": "string", "default": "Hello"}
                    },
                    "required": ["name"]
                }),
            ),
            Tool::new(
                "add",
                "Add two numbers",
                json!({
                    "type": "object",
                    "properties": {
                        "a": {"type": "number"},
                        "b": {"type": "number"}
                    },
                    "required": ["a", "b"]
                }),
            ),
        ]
    }

    fn handle_tool(&self, name: &str, arguments: &Value) -> Result<Value> {
        self.router.dispatch(name, arguments)
    }
}

fn invalid_arguments(err: &ServerError, tool: &str) -> Value {
    error_response(err.to_string(), [("tool", json!(tool))])
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let config = RuntimeConfig::from_env()?;

    let runner = ServerRunner::new(GreeterServer::new()?)
        .with_config(config)
        .with_startup_hook(|| {
            info!("greeter ready");
            Ok(())
        })
        .with_health_check(|| Ok(true))
        .with_error_handler(ErrorHandler::for_type(invalid_arguments));

    let outcome = runner.run().await?;
    Ok(outcome.exit_code())
}
