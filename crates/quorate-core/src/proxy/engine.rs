use std::{sync::Arc, time::Instant};
use tracing::{debug, warn};

use crate::{
    config::BackendsConfig,
    consensus::ResponseSet,
    metrics::{MetricsCollector, RequestOutcome},
    types::{JsonRpcRequest, JsonRpcResponse},
    upstream::{Backend, Dispatcher, HttpBackend, HttpClient, UpstreamError},
    wire::{BlockRef, Quantity, WireError, WireValue},
};

use super::{
    errors::ProxyError,
    methods::{MethodPolicy, BLOCK_NUMBER},
    params::{decode_params, encode_params},
};

/// Runs client requests through the method table, the dispatcher and the resolvers.
///
/// The engine holds no per-request state; one instance serves every request concurrently.
pub struct ProxyEngine {
    dispatcher: Dispatcher,
    blocks_behind_tolerance: i64,
    metrics_collector: Arc<MetricsCollector>,
}

impl ProxyEngine {
    #[must_use]
    pub fn new(
        dispatcher: Dispatcher,
        blocks_behind_tolerance: u64,
        metrics_collector: Arc<MetricsCollector>,
    ) -> Self {
        Self {
            dispatcher,
            blocks_behind_tolerance: i64::try_from(blocks_behind_tolerance).unwrap_or(i64::MAX),
            metrics_collector,
        }
    }

    /// Builds one [`HttpBackend`] per configured URL behind a shared [`HttpClient`].
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] if the HTTP client cannot be built or a URL is malformed.
    pub fn from_config(
        config: &BackendsConfig,
        metrics_collector: Arc<MetricsCollector>,
    ) -> Result<Self, UpstreamError> {
        let http_client = Arc::new(HttpClient::new()?);
        let timeout = config.timeout();

        let backends = config
            .urls
            .iter()
            .map(|url| {
                HttpBackend::new(url, timeout, Arc::clone(&http_client))
                    .map(|b| Arc::new(b) as Arc<dyn Backend>)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let dispatcher = Dispatcher::new(backends).with_call_deadline(config.call_deadline());

        Ok(Self::new(dispatcher, config.blocks_behind_tolerance, metrics_collector))
    }

    #[must_use]
    pub fn backend_count(&self) -> usize {
        self.dispatcher.backend_count()
    }

    pub fn backend_names(&self) -> impl Iterator<Item = &str> {
        self.dispatcher.backend_names()
    }

    #[must_use]
    pub fn metrics(&self) -> &Arc<MetricsCollector> {
        &self.metrics_collector
    }

    /// Processes one JSON-RPC request end to end and records its metrics.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError`] for invalid requests, unsupported methods, malformed arguments,
    /// quorum failures and result encoding failures. Nothing is sent to a backend unless
    /// the request and its arguments are well formed.
    pub async fn process_request(
        &self,
        request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, ProxyError> {
        let method = request.method.clone();
        let start = Instant::now();

        let result = self.handle_request(request).await;
        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        let outcome = match &result {
            Ok(_) => RequestOutcome::Success,
            Err(ProxyError::Consensus(error)) => {
                warn!(
                    method = %method,
                    reason = error.reason(),
                    error = %error,
                    "backends did not agree"
                );
                self.metrics_collector.record_consensus_failure(&method, error.reason());
                RequestOutcome::ConsensusFailure
            }
            Err(ProxyError::Internal(_)) => RequestOutcome::Internal,
            Err(_) => RequestOutcome::Rejected,
        };
        self.metrics_collector.record_request(&method, outcome, latency_ms);

        result
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse, ProxyError> {
        let policy = request.validate()?;
        let args = decode_params(policy, request.positional_params())?;

        let value = self.call(policy, args).await?;
        let result = value.to_json().map_err(|e| ProxyError::Internal(e.to_string()))?;

        Ok(JsonRpcResponse::success(result, request.id))
    }

    /// Calls `policy` on every backend with already decoded arguments and reconciles the
    /// answers.
    ///
    /// `earliest` is rejected before any backend is contacted. `latest` and `pending` are
    /// replaced by the block number agreed on by the backends, so every backend answers for
    /// the same block.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::InvalidArgument`] for an `earliest` block tag
    /// - [`ProxyError::Consensus`] if the block number or the call itself has no quorum
    pub async fn call(
        &self,
        policy: &MethodPolicy,
        mut args: Vec<WireValue>,
    ) -> Result<WireValue, ProxyError> {
        let earliest =
            args.iter().position(|a| matches!(a, WireValue::BlockRef(BlockRef::Earliest)));
        if let Some(index) = earliest {
            let source = WireError::UnsupportedTag("earliest".to_string());
            return Err(ProxyError::InvalidArgument { index, source });
        }

        if args.iter().any(|a| a.as_block_ref().is_some_and(BlockRef::needs_resolution)) {
            let head = self.block_number().await?;
            debug!(method = policy.method, block = %head, "resolved block tag");
            for arg in &mut args {
                if arg.as_block_ref().is_some_and(BlockRef::needs_resolution) {
                    *arg = WireValue::BlockRef(BlockRef::Number(head.clone()));
                }
            }
        }

        let params = encode_params(&args)?;
        self.dispatch_and_resolve(policy, params).await
    }

    /// The block number the backends agree on, allowing each to lag by the configured
    /// tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Consensus`] if too few backends returned a block number.
    pub async fn block_number(&self) -> Result<Quantity, ProxyError> {
        match self.dispatch_and_resolve(&BLOCK_NUMBER, Vec::new()).await? {
            WireValue::Quantity(number) => Ok(number),
            other => Err(ProxyError::Internal(format!("block number resolved to {other:?}"))),
        }
    }

    async fn dispatch_and_resolve(
        &self,
        policy: &MethodPolicy,
        params: Vec<serde_json::Value>,
    ) -> Result<WireValue, ProxyError> {
        let responses = self.dispatcher.dispatch(policy.result, policy.method, params).await;
        self.record_backend_errors(&responses);

        let min_req = policy.quorum.min_req(self.dispatcher.backend_count());
        let value = policy.resolver.resolve(&responses, min_req, -self.blocks_behind_tolerance)?;

        debug!(
            method = policy.method,
            resolver = policy.resolver.as_str(),
            responses = responses.len(),
            errors = responses.error_count(),
            "resolved call"
        );
        Ok(value)
    }

    fn record_backend_errors(&self, responses: &ResponseSet) {
        for (backend, error) in responses.errors() {
            self.metrics_collector.record_backend_error(backend, error.kind());
        }
    }
}
