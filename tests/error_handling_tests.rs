//! Error Handling and Logging Tests
//!
//! Tool-call failures degrade to responses and are logged; startup
//! failures are logged before propagating.


use anyhow::Result;
use mcp_server_base::{ErrorHandler, McpServer, RunOptions, ServerRunner};
use serde_json::json;
use test_helpers::{run_session, tool_call, tool_payload, DomainError, TestServer};
use tracing_test::traced_test;

#[test]
#[traced_test]
fn test_fallback_error_is_logged() {
    let runner = ServerRunner::new(TestServer::new());
    let response = runner.call_tool("explode", &json!({}));

    assert_eq!(response["success"], false);
    assert!(logs_contain("Unexpected error in tool explode"));
}

#[test]
#[traced_test]
fn test_handled_error_is_not_logged_as_unexpected() {
    let runner = ServerRunner::new(TestServer::new()).with_error_handler(
        ErrorHandler::for_type(|e: &DomainError, _: &str| {
            json!({"success": false, "error": e.to_string()})
        }),
    );
    let response = runner.call_tool("lookup", &json!({"id": "1"}));

    assert_eq!(response["error"], "Belief not found: 1");
    assert!(!logs_contain("Unexpected error in tool"));
}

#[tokio::test]
#[traced_test]
async fn test_startup_failure_is_logged() -> Result<()> {
    let runner = ServerRunner::new(TestServer::new())
        .with_startup_hook(|| anyhow::bail!("schema init failed"));

    let result = run_session(&runner, RunOptions::default(), &[]).await;
    assert!(result.is_err());
    assert!(logs_contain("Startup hook failed"));
    Ok(())
}

#[tokio::test]
#[traced_test]
async fn test_health_check_failure_is_logged() -> Result<()> {
    let runner = ServerRunner::new(TestServer::new())
        .with_health_check(|| anyhow::bail!("database unreachable"));

    let options = RunOptions {
        health_check: true,
        ..RunOptions::default()
    };
    let (outcome, _) = run_session(&runner, options, &[]).await?;
    assert_eq!(outcome.code(), 1);
    assert!(logs_contain("database unreachable"));
    Ok(())
}

#[tokio::test]
async fn test_error_handler_does_not_catch_startup_errors() -> Result<()> {
    let runner = ServerRunner::new(TestServer::new())
        .with_startup_hook(|| Err(DomainError::Validation("startup".to_string()).into()))
        .with_error_handler(ErrorHandler::when(|_| true, |_, _| json!({"handled": true})));

    let result = run_session(
        &runner,
        RunOptions::default(),
        &[tool_call(1, "greet", json!({"name": "Ada"}))],
    )
    .await;
    assert!(result.is_err());
    Ok(())
}

#[tokio::test]
async fn test_handle_tool_errors_surface_directly() -> Result<()> {
    let server = TestServer::new();
    // The raw contract propagates; only the runner converts to responses
    assert!(server.handle_tool("explode", &json!({})).is_err());

    let runner = ServerRunner::new(TestServer::new());
    let (_, responses) =
        run_session(&runner, RunOptions::default(), &[tool_call(1, "explode", json!({}))]).await?;
    assert_eq!(tool_payload(&responses[0])["success"], false);
    Ok(())
}
