//! Base server contract and lifecycle runner
//!
//! A concrete server implements [`McpServer`]. [`ServerRunner`] owns the
//! optional startup hook, health check and error handlers, parses the
//! process flags, and drives the server through its lifecycle:
//!
//! ```no_run
//! use mcp_server_base::{success_response, McpServer, ServerRunner, Tool};
//! use serde_json::{json, Value};
//!
//! struct MyServer;
//!
//! impl McpServer for MyServer {
//!     fn server_name(&self) -> &str {
//!         "my-server"
//!     }
//!
//!     fn get_tools(&self) -> Vec<Tool> {
//!         vec![Tool::no_arguments("my_tool", "Does the thing")]
//!     }
//!
//!     fn handle_tool(&self, name: &str, _arguments: &Value) -> anyhow::Result<Value> {
//!         match name {
//!             "my_tool" => Ok(success_response([("data", json!("..."))])),
//!             _ => anyhow::bail!("Unknown tool: {name}"),
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<std::process::ExitCode> {
//!     let outcome = ServerRunner::new(MyServer)
//!         .with_startup_hook(|| Ok(()))
//!         .with_health_check(|| Ok(true))
//!         .run()
//!         .await?;
//!     Ok(outcome.exit_code())
//! }
//! ```

use crate::cli::{build_command, parse_options, RunOptions};
use crate::config::RuntimeConfig;
use crate::error::ServerError;
use crate::logging::init_logging;
use crate::mcp_server::{MCPHandlers, StdioTransport, Tool, ToolDispatcher};
use crate::responses::{error_response, Fields};
use anyhow::Result;
use serde_json::Value;
use std::any::Any;
use std::ffi::OsString;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::process::ExitCode;
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tracing::{debug, error, info, warn};

/// Capabilities every MCP server provides
pub trait McpServer: Send + Sync {
    fn server_name(&self) -> &str {
        "mcp-server"
    }

    fn server_description(&self) -> &str {
        "MCP Server"
    }

    fn server_version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    /// Tools advertised by this server, in order
    fn get_tools(&self) -> Vec<Tool>;

    /// Handle a tool call and return a response object with a `success` key.
    ///
    /// Errors go through the runner's error handlers. A panic is caught and
    /// answered as an internal error; the server keeps serving.
    fn handle_tool(&self, name: &str, arguments: &Value) -> Result<Value>;
}

type StartupHook = Box<dyn Fn() -> Result<()> + Send + Sync>;
type HealthCheck = Box<dyn Fn() -> Result<bool> + Send + Sync>;
type ErrorMatcher = Box<dyn Fn(&anyhow::Error) -> bool + Send + Sync>;
type ErrorFormatter = Box<dyn Fn(&anyhow::Error, &str) -> Value + Send + Sync>;

/// Translates a tool-call error into a response payload
pub struct ErrorHandler {
    matches: ErrorMatcher,
    handle: ErrorFormatter,
}

impl ErrorHandler {
    /// Match errors of type `E` anywhere in the error's source chain.
    ///
    /// The handler receives the matched error and the tool name.
    pub fn for_type<E, F>(handler: F) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
        F: Fn(&E, &str) -> Value + Send + Sync + 'static,
    {
        Self {
            matches: Box::new(|err: &anyhow::Error| find_cause::<E>(err).is_some()),
            handle: Box::new(move |err: &anyhow::Error, tool: &str| match find_cause::<E>(err) {
                Some(cause) => handler(cause, tool),
                None => internal_error(err),
            }),
        }
    }

    /// Match errors accepted by `predicate`
    pub fn when<P, F>(predicate: P, handler: F) -> Self
    where
        P: Fn(&anyhow::Error) -> bool + Send + Sync + 'static,
        F: Fn(&anyhow::Error, &str) -> Value + Send + Sync + 'static,
    {
        Self {
            matches: Box::new(predicate),
            handle: Box::new(handler),
        }
    }

    pub fn matches(&self, err: &anyhow::Error) -> bool {
        (self.matches)(err)
    }

    pub fn handle(&self, err: &anyhow::Error, tool_name: &str) -> Value {
        (self.handle)(err, tool_name)
    }
}

impl std::fmt::Debug for ErrorHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorHandler").finish_non_exhaustive()
    }
}

fn find_cause<E>(err: &anyhow::Error) -> Option<&E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    err.downcast_ref::<E>()
        .or_else(|| err.chain().find_map(|cause| cause.downcast_ref::<E>()))
}

fn internal_error(err: &anyhow::Error) -> Value {
    error_response(format!("Internal error: {err:#}"), Fields::new())
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("tool panicked")
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The serve loop ran until its input closed
    Served,
    /// Health-check mode, healthy
    Healthy,
    /// Health-check mode, unhealthy or the check failed
    Unhealthy,
}

impl RunOutcome {
    pub fn code(self) -> u8 {
        match self {
            RunOutcome::Served | RunOutcome::Healthy => 0,
            RunOutcome::Unhealthy => 1,
        }
    }

    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// Drives an [`McpServer`] through startup, health checks and serving
pub struct ServerRunner<S> {
    server: S,
    startup_hook: Option<StartupHook>,
    health_check: Option<HealthCheck>,
    error_handlers: Vec<ErrorHandler>,
    config: RuntimeConfig,
}

impl<S: McpServer> ServerRunner<S> {
    pub fn new(server: S) -> Self {
        Self {
            server,
            startup_hook: None,
            health_check: None,
            error_handlers: Vec::new(),
            config: RuntimeConfig::default(),
        }
    }

    /// Hook run before serving (e.g. schema initialization). Errors are fatal.
    pub fn with_startup_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn() -> Result<()> + Send + Sync + 'static,
    {
        self.startup_hook = Some(Box::new(hook));
        self
    }

    /// Check run in `--health-check` mode
    pub fn with_health_check<F>(mut self, check: F) -> Self
    where
        F: Fn() -> Result<bool> + Send + Sync + 'static,
    {
        self.health_check = Some(Box::new(check));
        self
    }

    /// Append an error handler; handlers are tried in the order added
    pub fn with_error_handler(mut self, handler: ErrorHandler) -> Self {
        self.error_handlers.push(handler);
        self
    }

    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn server(&self) -> &S {
        &self.server
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Argument parser for this server's flags
    pub fn command(&self) -> clap::Command {
        build_command(
            self.server.server_name(),
            self.server.server_description(),
            self.server.server_version(),
            self.health_check.is_some(),
            self.startup_hook.is_some(),
        )
    }

    pub fn parse_args<I, T>(&self, args: I) -> Result<RunOptions, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        parse_options(self.command(), args)
    }

    /// Run with the process arguments over stdin/stdout.
    ///
    /// Usage errors print to stderr and exit the process, like any CLI.
    pub async fn run(&self) -> Result<RunOutcome> {
        let options = self
            .parse_args(std::env::args_os())
            .unwrap_or_else(|e| e.exit());
        self.run_with_options(options).await
    }

    /// Run with explicit arguments over stdin/stdout
    pub async fn run_with_args<I, T>(&self, args: I) -> Result<RunOutcome>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let options = self.parse_args(args)?;
        self.run_with_options(options).await
    }

    pub async fn run_with_options(&self, options: RunOptions) -> Result<RunOutcome> {
        init_logging(&self.config);
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.run_with_io(options, stdin, stdout).await
    }

    /// Run the full lifecycle, serving requests from `reader` to `writer`
    pub async fn run_with_io<R, W>(
        &self,
        options: RunOptions,
        reader: R,
        writer: W,
    ) -> Result<RunOutcome>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        if options.health_check {
            if let Some(outcome) = self.check_health() {
                return Ok(outcome);
            }
        }

        info!("{} MCP server starting...", self.server.server_name());

        if !options.skip_startup_hook {
            self.run_startup_hook()?;
        }

        let handlers = MCPHandlers::new(self, self.config.protocol_version.clone());
        StdioTransport::new().serve(reader, writer, &handlers).await?;

        info!("{} MCP server stopped", self.server.server_name());
        Ok(RunOutcome::Served)
    }

    /// Run the health check, if one is configured
    pub fn check_health(&self) -> Option<RunOutcome> {
        let check = self.health_check.as_ref()?;
        let outcome = match check() {
            Ok(true) => {
                info!("Health check passed");
                RunOutcome::Healthy
            }
            Ok(false) => {
                warn!("Health check reported unhealthy");
                RunOutcome::Unhealthy
            }
            Err(e) => {
                error!("Health check failed: {:#}", e);
                RunOutcome::Unhealthy
            }
        };
        Some(outcome)
    }

    /// Run the startup hook, if one is configured
    pub fn run_startup_hook(&self) -> Result<(), ServerError> {
        let Some(hook) = self.startup_hook.as_ref() else {
            return Ok(());
        };

        match hook() {
            Ok(()) => {
                info!("Startup hook completed");
                Ok(())
            }
            Err(e) => {
                error!("Startup hook failed: {:#}", e);
                Err(ServerError::StartupHook(e))
            }
        }
    }

    /// Execute a tool call, translating failures into error responses
    pub fn call_tool(&self, name: &str, arguments: &Value) -> Value {
        let result = match catch_unwind(AssertUnwindSafe(|| {
            self.server.handle_tool(name, arguments)
        })) {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(tool = name, "Tool {} panicked: {}", name, message);
                return error_response(format!("Internal error: {message}"), Fields::new());
            }
        };

        match result {
            Ok(response) => response,
            Err(err) => {
                if let Some(handler) = self.error_handlers.iter().find(|h| h.matches(&err)) {
                    debug!("Custom error handler matched for tool {}: {}", name, err);
                    return handler.handle(&err, name);
                }

                error!(tool = name, error = ?err, "Unexpected error in tool {}", name);
                internal_error(&err)
            }
        }
    }
}

impl<S: McpServer> ToolDispatcher for ServerRunner<S> {
    fn server_name(&self) -> &str {
        self.server.server_name()
    }

    fn server_version(&self) -> &str {
        self.server.server_version()
    }

    fn server_description(&self) -> &str {
        self.server.server_description()
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.server.get_tools()
    }

    fn call_tool(&self, name: &str, arguments: &Value) -> Value {
        ServerRunner::call_tool(self, name, arguments)
    }
}
