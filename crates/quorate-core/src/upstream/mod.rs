//! Backend clients and the concurrent dispatcher.
//!
//! - [`Backend`]: the capability the dispatcher calls, one per upstream node
//! - [`HttpBackend`]: JSON-RPC over HTTP(S) through a shared pooled [`HttpClient`]
//! - [`Dispatcher`]: one task per backend per call, joined before returning
//!
//! Nothing here retries. A failed backend is reported as an error entry and the resolvers
//! decide what that means for the call.

pub mod backend;
pub mod dispatcher;
pub mod endpoint;
pub mod errors;
pub mod http_client;

pub use backend::Backend;
pub use dispatcher::Dispatcher;
pub use endpoint::HttpBackend;
pub use errors::UpstreamError;
pub use http_client::{HttpClient, HttpClientConfig};
