use thiserror::Error;

use crate::wire::WireError;

/// Failure of a single backend call.
///
/// These never abort a dispatch: each one becomes an error entry in the response set and
/// takes part in error aggregation by its display text.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Request exceeded the backend timeout or the call deadline.
    #[error("request timeout")]
    Timeout,

    /// Failed to reach the backend endpoint.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Non-2xx HTTP status. Fields are the status code and a truncated body.
    #[error("HTTP error {0}: {1}")]
    HttpError(u16, String),

    /// JSON-RPC error object returned by the node. Displays the node's message verbatim
    /// so identical node errors aggregate together.
    #[error("{1}")]
    RpcError(i32, String),

    /// Response body was not a JSON-RPC response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The node answered, but the result violates the wire contract of the method.
    #[error("malformed result: {0}")]
    Decode(#[from] WireError),

    /// The backend task panicked.
    #[error("backend task panicked: {0}")]
    Panicked(String),
}

impl UpstreamError {
    /// Static label used for metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::ConnectionFailed(_) => "connection",
            Self::HttpError(..) => "http",
            Self::RpcError(..) => "rpc",
            Self::InvalidResponse(_) => "invalid_response",
            Self::Decode(_) => "decode",
            Self::Panicked(_) => "panic",
        }
    }

    /// JSON-RPC error code when the node itself reported the error.
    #[must_use]
    pub fn rpc_code(&self) -> Option<i32> {
        match self {
            Self::RpcError(code, _) => Some(*code),
            _ => None,
        }
    }
}
