//! Tool routing helper for MCP servers
//!
//! Maps tool names to handler functions. Handlers declare their parameters
//! as a deserializable struct; `dispatch` turns the call's argument object
//! into that struct, so serde defaults and required fields behave like
//! ordinary named parameters. Arguments the struct does not declare are
//! rejected rather than dropped.
//!
//! ```
//! use mcp_server_base::{success_response, ToolRouter};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Deserialize)]
//! struct Greet {
//!     name: String,
//! }
//!
//! let mut router = ToolRouter::new();
//! router
//!     .register("greet", |args: Greet| {
//!         Ok(success_response([("message", json!(format!("Hello, {}!", args.name)))]))
//!     })
//!     .unwrap();
//!
//! let result = router.dispatch("greet", &json!({"name": "Ada"})).unwrap();
//! assert_eq!(result, json!({"success": true, "message": "Hello, Ada!"}));
//! ```

use crate::error::ServerError;
use crate::responses::not_found_response;
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

type BoxedHandler = Box<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// Name-to-handler registry
#[derive(Default)]
pub struct ToolRouter {
    handlers: HashMap<String, BoxedHandler>,
    order: Vec<String>,
}

impl ToolRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler whose parameters are deserialized from the call arguments
    pub fn register<A, F>(&mut self, name: &str, handler: F) -> Result<&mut Self, ServerError>
    where
        A: DeserializeOwned + 'static,
        F: Fn(A) -> Result<Value> + Send + Sync + 'static,
    {
        let tool = name.to_string();
        self.insert(
            name,
            Box::new(move |arguments: &Value| {
                let args = parse_arguments::<A>(arguments).map_err(|source| {
                    ServerError::InvalidArguments {
                        tool: tool.clone(),
                        source,
                    }
                })?;
                handler(args)
            }),
        )
    }

    /// Register a handler that receives the raw argument object
    pub fn register_raw<F>(&mut self, name: &str, handler: F) -> Result<&mut Self, ServerError>
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.insert(name, Box::new(handler))
    }

    fn insert(&mut self, name: &str, handler: BoxedHandler) -> Result<&mut Self, ServerError> {
        if self.handlers.contains_key(name) {
            return Err(ServerError::DuplicateTool {
                name: name.to_string(),
            });
        }
        self.handlers.insert(name.to_string(), handler);
        self.order.push(name.to_string());
        Ok(self)
    }

    /// Dispatch to the registered handler.
    ///
    /// Unknown tools yield a not found response rather than an error.
    pub fn dispatch(&self, name: &str, arguments: &Value) -> Result<Value> {
        match self.handlers.get(name) {
            Some(handler) => {
                debug!("Dispatching tool: {}", name);
                handler(arguments)
            }
            None => {
                debug!("No handler registered for tool: {}", name);
                Ok(not_found_response("Tool", name))
            }
        }
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered tool names in registration order
    pub fn tool_names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Deserialize call arguments, failing on any key `A` does not declare
fn parse_arguments<A: DeserializeOwned>(arguments: &Value) -> serde_json::Result<A> {
    let mut unexpected = Vec::new();
    let args = serde_ignored::deserialize(arguments.clone(), |path| {
        unexpected.push(path.to_string())
    })?;

    if unexpected.is_empty() {
        Ok(args)
    } else {
        Err(serde::de::Error::custom(format!(
            "unexpected argument(s): {}",
            unexpected.join(", ")
        )))
    }
}

impl std::fmt::Debug for ToolRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRouter")
            .field("tools", &self.order)
            .finish()
    }
}
