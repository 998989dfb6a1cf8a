//! Request processing against real HTTP backends served by mockito.

use quorate_core::proxy::ProxyEngine;
use serde_json::{json, Value};

use crate::mock_infrastructure::{
    create_test_transaction, http_engine, rpc, RpcMockBuilder, TEST_ADDRESS,
};

const ONE_WORD: &str = "0x0000000000000000000000000000000000000000000000000000000000000001";

async fn mocks(count: usize) -> Vec<RpcMockBuilder> {
    let mut mocks = Vec::with_capacity(count);
    for _ in 0..count {
        mocks.push(RpcMockBuilder::new().await);
    }
    mocks
}

fn engine_for(mocks: &[RpcMockBuilder]) -> ProxyEngine {
    http_engine(&mocks.iter().map(RpcMockBuilder::url).collect::<Vec<_>>())
}

#[tokio::test]
async fn test_block_number_over_http() {
    let mut mocks = mocks(3).await;
    mocks[0].mock_block_number(100);
    mocks[1].mock_block_number(100);
    mocks[2].mock_block_number(97);
    let engine = engine_for(&mocks);

    let response = engine.process_request(rpc("eth_blockNumber", json!([]))).await.unwrap();
    assert_eq!(response.result, Some(json!("0x61")));
    assert_eq!(*response.id, json!(1));
}

#[tokio::test]
async fn test_latest_resolves_block_number_first() {
    let mut mocks = mocks(3).await;
    for mock in &mut mocks {
        mock.expect_calls("eth_blockNumber", &json!("0x64"), 1);
        let pinned = r#""params":\[[^\]]*"0x64"\]"#;
        mock.mock_result_for_params("eth_getBalance", pinned, &json!("0xde0b6b3a7640000"));
    }
    let engine = engine_for(&mocks);

    let request = rpc("eth_getBalance", json!([TEST_ADDRESS, "latest"]));
    let response = engine.process_request(request).await.unwrap();
    assert_eq!(response.result, Some(json!("0xde0b6b3a7640000")));

    for mock in &mocks {
        mock.assert();
    }
}

#[tokio::test]
async fn test_earliest_sends_nothing() {
    let mut mocks = mocks(2).await;
    for mock in &mut mocks {
        mock.expect_calls("eth_getBalance", &json!("0x0"), 0);
        mock.expect_calls("eth_blockNumber", &json!("0x64"), 0);
    }
    let engine = engine_for(&mocks);

    let request = rpc("eth_getBalance", json!([TEST_ADDRESS, "earliest"]));
    let err = engine.process_request(request).await.unwrap_err();
    assert_eq!(err.code(), -32602);
    assert_eq!(err.to_string(), "invalid argument 1: unsupported block tag: earliest");

    for mock in &mocks {
        mock.assert();
    }
}

#[tokio::test]
async fn test_identical_node_errors_are_forwarded() {
    let mut mocks = mocks(3).await;
    for mock in &mut mocks {
        mock.mock_rpc_error("eth_call", 3, "execution reverted");
    }
    let engine = engine_for(&mocks);

    let call = json!({"to": TEST_ADDRESS, "data": "0x70a08231"});
    let err = engine.process_request(rpc("eth_call", json!([call, "0x64"]))).await.unwrap_err();
    assert_eq!(err.code(), -32000);
    assert_eq!(err.to_string(), "execution reverted");
}

#[tokio::test]
async fn test_eth_call_without_block_argument() {
    let mut mocks = mocks(2).await;
    for mock in &mut mocks {
        mock.mock_result_for_params("eth_call", r#""params":\[\{[^\]]*\}\]"#, &json!(ONE_WORD));
    }
    let engine = engine_for(&mocks);

    let call = json!({"to": TEST_ADDRESS, "data": "0x70a08231"});
    let response = engine.process_request(rpc("eth_call", json!([call, null]))).await.unwrap();
    assert_eq!(response.result, Some(json!(ONE_WORD)));
}

#[tokio::test]
async fn test_http_error_is_not_retried() {
    let mut mocks = mocks(3).await;
    mocks[0].mock_result("eth_chainId", &json!("0x1"));
    mocks[1].mock_result("eth_chainId", &json!("0x1"));
    mocks[2].expect_http_status(503, 1);
    let engine = engine_for(&mocks);

    let response = engine.process_request(rpc("eth_chainId", json!([]))).await.unwrap();
    assert_eq!(response.result, Some(json!("0x1")));
    mocks[2].assert();

    let summary = engine.metrics().get_metrics_summary().await;
    assert_eq!(summary.backend_errors, 1);
}

#[tokio::test]
async fn test_unreachable_backend_is_outvoted() {
    let mut mocks = mocks(2).await;
    for mock in &mut mocks {
        mock.mock_result("net_version", &json!("1"));
    }
    let mut urls: Vec<String> = mocks.iter().map(RpcMockBuilder::url).collect();
    urls.push("http://127.0.0.1:1".to_string());
    let engine = http_engine(&urls);

    let response = engine.process_request(rpc("net_version", json!([]))).await.unwrap();
    assert_eq!(response.result, Some(json!("1")));
}

#[tokio::test]
async fn test_transaction_by_hash_over_http() {
    let transaction = create_test_transaction(100, 2);
    let hash = transaction["hash"].clone();

    let mut mocks = mocks(2).await;
    for mock in &mut mocks {
        mock.mock_result("eth_getTransactionByHash", &transaction);
    }
    let engine = engine_for(&mocks);

    let request = rpc("eth_getTransactionByHash", json!([hash]));
    let response = engine.process_request(request).await.unwrap();
    let result = response.result.unwrap();
    assert_eq!(result["hash"], hash);
    assert_eq!(result["blockNumber"], "0x64");
    assert_eq!(result["to"], "0x0000000000000000000000000000000000000002");
}

#[tokio::test]
async fn test_invalid_arguments_are_rejected_locally() {
    let mut mocks = mocks(2).await;
    for mock in &mut mocks {
        mock.expect_calls("eth_getBalance", &json!("0x0"), 0);
    }
    let engine = engine_for(&mocks);

    let request = rpc("eth_getBalance", json!(["0x1234", "0x64"]));
    let err = engine.process_request(request).await.unwrap_err();
    assert_eq!(err.code(), -32602);

    let request = rpc("eth_getBalance", json!([TEST_ADDRESS]));
    let err = engine.process_request(request).await.unwrap_err();
    assert_eq!(err.to_string(), "missing value for required argument 1");

    let request = rpc("eth_getBalance", json!([TEST_ADDRESS, "0x64", true]));
    let err = engine.process_request(request).await.unwrap_err();
    assert_eq!(err.to_string(), "too many arguments, want at most 2");

    for mock in &mocks {
        mock.assert();
    }
}

#[tokio::test]
async fn test_null_result_is_forwarded() {
    let mut mocks = mocks(2).await;
    for mock in &mut mocks {
        mock.mock_result("eth_getTransactionByHash", &Value::Null);
    }
    let engine = engine_for(&mocks);

    let hash = format!("0x{}", "ef".repeat(32));
    let request = rpc("eth_getTransactionByHash", json!([hash]));
    let response = engine.process_request(request).await.unwrap();
    assert_eq!(response.result, Some(Value::Null));
}
