//! HTTP middleware for the RPC server.

pub mod correlation_id;
pub mod cors;

pub use correlation_id::{create_request_id_layers, UuidRequestIdGenerator, X_REQUEST_ID};
pub use cors::cors_middleware;
