//! Request checks that run before any policy-driven work.
//!
//! Validation is pure computation: no I/O, no backend contact. The `server` crate maps
//! [`ValidationError`] to a JSON-RPC error object through [`crate::proxy::ProxyError`].

pub mod validation;

pub use validation::ValidationError;
