use async_trait::async_trait;
use serde_json::Value;
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};
use url::Url;

use super::{backend::Backend, errors::UpstreamError, http_client::HttpClient};
use crate::types::{JsonRpcRequest, JsonRpcResponse};

/// JSON-RPC backend reached over HTTP(S).
///
/// Each call is one POST through the shared [`HttpClient`]. A JSON-RPC `error` object in the
/// answer becomes [`UpstreamError::RpcError`]; a missing or `null` result becomes
/// [`Value::Null`].
pub struct HttpBackend {
    name: Arc<str>,
    url: String,
    timeout: Duration,
    http_client: Arc<HttpClient>,
    next_id: AtomicU64,
}

impl HttpBackend {
    /// Creates a backend named after the URL's `host[:port]`.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::ConnectionFailed`] if the URL cannot be parsed or has no host.
    pub fn new(
        url: &str,
        timeout: Duration,
        http_client: Arc<HttpClient>,
    ) -> Result<Self, UpstreamError> {
        let parsed = Url::parse(url)
            .map_err(|e| UpstreamError::ConnectionFailed(format!("invalid backend url: {e}")))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| UpstreamError::ConnectionFailed("backend url has no host".to_string()))?;
        let name = match parsed.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        Ok(Self::with_name(name, url, timeout, http_client))
    }

    #[must_use]
    pub fn with_name(
        name: impl Into<Arc<str>>,
        url: impl Into<String>,
        timeout: Duration,
        http_client: Arc<HttpClient>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            timeout,
            http_client,
            next_id: AtomicU64::new(1),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Backend for HttpBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn call(&self, method: &str, params: &[Value]) -> Result<Value, UpstreamError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let params = Some(Value::Array(params.to_vec()));
        let request = JsonRpcRequest::new(method, params, Value::from(id));
        let body = serde_json::to_vec(&request).map_err(|e| {
            UpstreamError::InvalidResponse(format!("failed to serialize request: {e}"))
        })?;

        let start = Instant::now();
        let response_bytes = self
            .http_client
            .send_request(&self.url, bytes::Bytes::from(body), self.timeout)
            .await?;

        tracing::debug!(
            backend = %self.name,
            method = method,
            latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "backend answered"
        );

        let response: JsonRpcResponse = serde_json::from_slice(&response_bytes)
            .map_err(|e| UpstreamError::InvalidResponse(format!("invalid JSON: {e}")))?;

        if let Some(error) = response.error {
            return Err(UpstreamError::RpcError(error.code, error.message));
        }

        Ok(response.result.unwrap_or(Value::Null))
    }
}
