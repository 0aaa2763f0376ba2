//! Base framework for building Model Context Protocol (MCP) servers.
//!
//! - [`McpServer`] and [`ServerRunner`]: the server contract and its
//!   lifecycle (startup hook, health check, error handlers, serving).
//! - [`ToolRouter`]: name-to-handler dispatch for tool calls.
//! - [`success_response`], [`error_response`], [`not_found_response`]:
//!   the `{success: bool, ...}` response shape.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod mcp_server;
pub mod responses;
pub mod router;
pub mod server;

pub use cli::RunOptions;
pub use config::{LogFormat, RuntimeConfig};
pub use error::ServerError;
pub use mcp_server::Tool;
pub use responses::{error_response, not_found_response, success_response, Fields};
pub use router::ToolRouter;
pub use server::{ErrorHandler, McpServer, RunOutcome, ServerRunner};
