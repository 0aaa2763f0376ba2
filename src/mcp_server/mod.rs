//! Model Context Protocol (MCP) runtime
//!
//! A minimal tools-only MCP runtime speaking JSON-RPC 2.0 over stdio:
//! request handlers, transport framing, and tool descriptors.

pub mod handlers;
pub mod tools;
pub mod transport;


pub use handlers::{MCPHandlers, ToolDispatcher};
pub use tools::Tool;
pub use transport::StdioTransport;
