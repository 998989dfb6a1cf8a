//! Integration tests for the quorate JSON-RPC aggregation proxy.
//!
//! - `consensus_tests`: resolver behavior driven through the engine with in-process fakes
//! - `proxy_engine_tests`: request processing against mockito HTTP backends
//! - `server_tests`: the full axum stack, CORS and batching included
//! - `mock_infrastructure`: reusable mock backends and fixtures
//!
//! ```bash
//! cargo test --package tests
//! ```


#[cfg(test)]
mod proxy_engine_tests;

#[cfg(test)]
mod server_tests;

/// Mock infrastructure for testing
pub mod mock_infrastructure;
