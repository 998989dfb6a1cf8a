use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use quorate_core::{
    proxy::{errors::INVALID_REQUEST, errors::PARSE_ERROR, ProxyEngine},
    types::{JsonRpcRequest, JsonRpcResponse},
};
use serde_json::Value;
use std::{sync::Arc, time::Instant};
use tracing::debug;

type RpcReply = (StatusCode, Json<Value>);

fn to_json(response: JsonRpcResponse) -> Value {
    serde_json::to_value(response).expect("JsonRpcResponse serialization cannot fail")
}

/// Handles JSON-RPC requests, single or batched.
///
/// Protocol errors are JSON-RPC error objects with HTTP 200. Only a body that is not JSON
/// at all is answered with HTTP 400 and a `-32700` parse error.
///
/// # Panics
///
/// Panics if `JsonRpcResponse` serialization fails, which cannot happen for these types.
pub async fn handle_rpc(
    State(proxy_engine): State<Arc<ProxyEngine>>,
    body: Bytes,
) -> impl IntoResponse {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            let message = format!("Parse error: {e}");
            let response = JsonRpcResponse::error(PARSE_ERROR, message, Arc::new(Value::Null));
            return (StatusCode::BAD_REQUEST, Json(to_json(response)));
        }
    };

    match payload {
        Value::Array(items) => handle_batch_request(proxy_engine, items).await,
        item => (StatusCode::OK, Json(process_item(&proxy_engine, item).await)),
    }
}

fn request_id(item: &Value) -> Arc<Value> {
    Arc::new(item.get("id").cloned().unwrap_or(Value::Null))
}

/// Runs one request object through the engine and renders the outcome.
async fn process_item(proxy_engine: &ProxyEngine, item: Value) -> Value {
    let id = request_id(&item);

    let request: JsonRpcRequest = match serde_json::from_value(item) {
        Ok(request) => request,
        Err(e) => {
            let message = format!("Invalid request: {e}");
            return to_json(JsonRpcResponse::error(INVALID_REQUEST, message, id));
        }
    };

    match proxy_engine.process_request(request).await {
        Ok(response) => to_json(response),
        Err(e) => to_json(JsonRpcResponse::error(e.code(), e.to_string(), id)),
    }
}

async fn handle_batch_request(proxy_engine: Arc<ProxyEngine>, items: Vec<Value>) -> RpcReply {
    if items.is_empty() {
        let message = "Invalid request: empty batch".to_string();
        let response = JsonRpcResponse::error(INVALID_REQUEST, message, Arc::new(Value::Null));
        return (StatusCode::OK, Json(to_json(response)));
    }

    let start = Instant::now();
    let batch_size = items.len();
    proxy_engine.metrics().record_batch(batch_size);

    // join_all keeps input order
    let responses = futures::future::join_all(
        items.into_iter().map(|item| process_item(&proxy_engine, item)),
    )
    .await;

    debug!(
        batch_size,
        duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        "processed batch"
    );

    (StatusCode::OK, Json(Value::Array(responses)))
}

pub async fn handle_metrics(State(proxy_engine): State<Arc<ProxyEngine>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        proxy_engine.metrics().get_prometheus_metrics(),
    )
}

pub async fn handle_health(State(proxy_engine): State<Arc<ProxyEngine>>) -> impl IntoResponse {
    let summary = proxy_engine.metrics().get_metrics_summary().await;
    let backends: Vec<&str> = proxy_engine.backend_names().collect();
    let healthy = !backends.is_empty();

    let health_status = serde_json::json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "backends": {
            "total": backends.len(),
            "names": backends,
        },
        "requests": {
            "total": summary.total_requests,
            "failed": summary.failed_requests,
            "consensus_failures": summary.consensus_failures,
        },
    });

    (if healthy { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE }, Json(health_status))
}
