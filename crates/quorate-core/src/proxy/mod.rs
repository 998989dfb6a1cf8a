//! Request processing.
//!
//! [`ProxyEngine`] validates a request, decodes its arguments against the method table,
//! pins block tags, fans the call out through the dispatcher and reduces the answers with
//! the method's resolver.

pub mod engine;
pub mod errors;
pub mod methods;
pub mod params;

pub use engine::ProxyEngine;
pub use errors::ProxyError;
pub use methods::{policy_for, MethodPolicy, Quorum};
