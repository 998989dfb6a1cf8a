//! The assembled HTTP service in front of mockito backends.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use quorate_core::config::AppConfig;
use serde_json::{json, Value};
use server::app::create_app;
use std::sync::Arc;
use tower::ServiceExt;

use crate::mock_infrastructure::{
    create_test_block, engine_with, http_engine, FakeBackend, RpcMockBuilder,
};

const ORIGIN: &str = "https://wallet.example.org";

async fn three_nodes() -> Vec<RpcMockBuilder> {
    let mut mocks = Vec::new();
    for head in [100, 100, 97] {
        let mut mock = RpcMockBuilder::new().await;
        mock.mock_block_number(head).mock_result("eth_chainId", &json!("0x1"));
        mocks.push(mock);
    }
    mocks
}

fn app_for(mocks: &[RpcMockBuilder]) -> Router {
    let urls: Vec<String> = mocks.iter().map(RpcMockBuilder::url).collect();
    create_app(Arc::new(http_engine(&urls)), &AppConfig::default())
}

fn post(body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .header("origin", ORIGIN)
        .body(Body::from(body.into()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, headers, body)
}

#[tokio::test]
async fn test_single_request_through_full_stack() {
    let mocks = three_nodes().await;
    let request = post(r#"{"jsonrpc":"2.0","method":"eth_blockNumber","params":[],"id":7}"#);
    let (status, headers, body) = send(app_for(&mocks), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"jsonrpc": "2.0", "result": "0x61", "id": 7}));
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), ORIGIN);
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_batch_keeps_request_order() {
    let mocks = three_nodes().await;
    let batch = json!([
        {"jsonrpc": "2.0", "method": "eth_chainId", "params": [], "id": "first"},
        {"jsonrpc": "2.0", "method": "eth_mining", "params": [], "id": 2},
        {"jsonrpc": "2.0", "method": "eth_blockNumber", "id": 3},
        {"jsonrpc": "2.0", "method": "eth_getBalance", "params": ["0xnope", "latest"], "id": 4}
    ]);
    let (status, _, body) = send(app_for(&mocks), post(batch.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    let responses = body.as_array().unwrap();
    assert_eq!(responses.len(), 4);
    assert_eq!(responses[0], json!({"jsonrpc": "2.0", "result": "0x1", "id": "first"}));
    assert_eq!(responses[1]["error"]["code"], -32601);
    assert_eq!(responses[1]["id"], 2);
    assert_eq!(responses[2]["result"], "0x61");
    assert_eq!(responses[3]["error"]["code"], -32602);
    assert_eq!(responses[3]["id"], 4);
}

#[tokio::test]
async fn test_preflight_never_reaches_backends() {
    let backend = FakeBackend::new("a").into_arc();
    let app = create_app(Arc::new(engine_with(&[Arc::clone(&backend)])), &AppConfig::default());

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/")
        .header("origin", ORIGIN)
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = send(app, request).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), ORIGIN);
    assert_eq!(headers.get("access-control-allow-methods").unwrap(), "POST");
    assert_eq!(headers.get("access-control-max-age").unwrap(), "86400");
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_not_json_is_bad_request() {
    let mocks = three_nodes().await;
    let (status, _, body) = send(app_for(&mocks), post("this is not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32700);
    assert_eq!(body["id"], Value::Null);
}

#[tokio::test]
async fn test_consensus_failure_keeps_http_ok() {
    let backends = [
        FakeBackend::new("a").result("eth_getBlockByNumber", create_test_block(100, 0)).into_arc(),
        FakeBackend::new("b").result("eth_getBlockByNumber", create_test_block(101, 0)).into_arc(),
    ];
    let app = create_app(Arc::new(engine_with(&backends)), &AppConfig::default());

    let request =
        post(r#"{"jsonrpc":"2.0","method":"eth_getBlockByNumber","params":["0x64",false],"id":1}"#);
    let (status, _, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["code"], -32000);
    assert_eq!(body["error"]["message"], "servers returned different responses");
    assert!(body.get("result").is_none());
}

#[tokio::test]
async fn test_health_and_metrics_endpoints() {
    let mocks = three_nodes().await;
    let app = app_for(&mocks);

    let request = post(r#"{"jsonrpc":"2.0","method":"eth_chainId","params":[],"id":1}"#);
    let (status, _, _) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::OK);

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, _, health) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["backends"]["total"], 3);
    assert_eq!(health["requests"]["total"], 1);

    let request = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&text).contains("rpc_requests_total"));
}
