//! Stdio Transport Implementation for MCP Protocol
//!
//! Newline-delimited JSON-RPC 2.0 messages over an async reader/writer
//! pair (stdin/stdout in production). Requests are processed one at a time.

use crate::error::Result;
use crate::mcp_server::handlers::MCPHandlers;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error};

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;

/// Stdio transport for MCP protocol
#[derive(Debug, Default)]
pub struct StdioTransport;

impl StdioTransport {
    pub fn new() -> Self {
        Self
    }

    /// Serve requests from `reader`, writing responses to `writer`, until EOF
    pub async fn serve<R, W>(
        &self,
        mut reader: R,
        mut writer: W,
        handlers: &MCPHandlers<'_>,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        debug!("Starting MCP stdio transport");

        let mut buffer = Vec::new();
        loop {
            buffer.clear();

            match reader.read_until(b'\n', &mut buffer).await {
                Ok(0) => {
                    debug!("EOF received, shutting down transport");
                    break;
                }
                Ok(_) => {
                    let response = match std::str::from_utf8(&buffer) {
                        Ok(line) => self.process_message(line, handlers),
                        Err(e) => {
                            error!("Received non UTF-8 input: {}", e);
                            Some(create_error_response(None, PARSE_ERROR, "Parse error"))
                        }
                    };
                    if let Some(response) = response {
                        send_response(&mut writer, &response).await?;
                    }
                }
                Err(e) => {
                    error!("IO error reading from input: {}", e);
                    return Err(e.into());
                }
            }
        }

        debug!("Stdio transport stopped");
        Ok(())
    }

    /// Process a single message, returning the response to send if any
    fn process_message(&self, line: &str, handlers: &MCPHandlers<'_>) -> Option<Value> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let request: Value = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(create_error_response(None, PARSE_ERROR, "Parse error"));
            }
        };

        let id = request.get("id");

        let method = match request.get("method").and_then(|m| m.as_str()) {
            Some(m) => m,
            None => {
                error!("Missing method in request");
                return Some(create_error_response(id, INVALID_REQUEST, "Invalid Request"));
            }
        };

        // Notifications never get a response
        if method.starts_with("notifications/") || id.is_none() {
            debug!("Received notification: {}", method);
            return None;
        }

        Some(handlers.handle_request(method, request.get("params"), id))
    }
}

async fn send_response<W>(writer: &mut W, response: &Value) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let response_str = serde_json::to_string(response)?;
    writer.write_all(response_str.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;

    debug!(
        "Sent response: {}",
        response_str.chars().take(200).collect::<String>()
    );
    Ok(())
}

/// Helper function to create JSON-RPC error responses
pub fn create_error_response(id: Option<&Value>, code: i32, message: &str) -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message
        }
    })
}

/// Helper function to create JSON-RPC success responses
pub fn create_success_response(id: Option<&Value>, result: Value) -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result
    })
}
