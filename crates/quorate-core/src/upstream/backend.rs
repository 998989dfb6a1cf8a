use async_trait::async_trait;
use serde_json::Value;

use super::UpstreamError;

/// A single upstream node as seen by the dispatcher.
///
/// Implementations own their transport, framing and timeout. They return the raw `result`
/// of the call; decoding into wire types happens in the dispatcher.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Stable label used in logs, metrics and error reports.
    fn name(&self) -> &str;

    /// Issues one JSON-RPC call.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] for transport failures and node-reported errors.
    async fn call(&self, method: &str, params: &[Value]) -> Result<Value, UpstreamError>;
}
