//! Router assembly.

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use quorate_core::{config::AppConfig, proxy::ProxyEngine};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{compression::CompressionLayer, limit::RequestBodyLimitLayer};

use crate::{middleware, router};

/// Builds the public router: JSON-RPC on `POST /`, plus `/health` and, when enabled,
/// `/metrics`.
pub fn create_app(proxy_engine: Arc<ProxyEngine>, config: &AppConfig) -> Router {
    let (set_request_id, propagate_request_id) = middleware::create_request_id_layers();

    let mut public = Router::new().route("/health", get(router::handle_health));
    if config.metrics.enabled {
        public = public.route("/metrics", get(router::handle_metrics));
    }
    let public = public.with_state(Arc::clone(&proxy_engine));

    let rpc = Router::new()
        .route("/", post(router::handle_rpc))
        .with_state(proxy_engine)
        .layer(ConcurrencyLimitLayer::new(config.server.max_concurrent_requests))
        .layer(RequestBodyLimitLayer::new(config.server.max_request_body_bytes))
        .layer(CompressionLayer::new());

    public
        .merge(rpc)
        .layer(propagate_request_id)
        .layer(set_request_id)
        .layer(from_fn(middleware::cors_middleware))
}
