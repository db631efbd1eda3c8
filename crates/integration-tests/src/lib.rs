//! Integration tests for CrossCart.
//!
//! # Running Tests
//!
//! The tests in `tests/` exercise the workflow engine against a running
//! CrossCart backend and are `#[ignore]`d by default:
//!
//! ```bash
//! # Point the engine at a backend
//! export CROSSCART_API_BASE_URL=http://localhost:8080/api
//! export CROSSCART_API_TOKEN=dev-token
//!
//! # Run integration tests
//! cargo test -p crosscart-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `quotation_workflow` - Draft → validate → submit flows, both protocols
//! - `refund_workflow` - Refund approval and rejection

use crosscart_engine::{CrossCartClient, EngineConfig, WorkflowEngine};

/// Build an engine from the environment, panicking with a usable message
/// when the backend variables are missing.
///
/// # Panics
///
/// Panics if `CROSSCART_API_BASE_URL` / `CROSSCART_API_TOKEN` are unset
/// or the HTTP client cannot be built.
#[must_use]
pub fn engine_from_env() -> WorkflowEngine {
    let config = EngineConfig::from_env()
        .expect("set CROSSCART_API_BASE_URL and CROSSCART_API_TOKEN to run integration tests");
    let client = CrossCartClient::new(&config).expect("failed to build backend client");
    WorkflowEngine::new(client)
}

/// Install a test-friendly tracing subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}
