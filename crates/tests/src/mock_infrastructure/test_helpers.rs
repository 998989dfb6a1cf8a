//! Fixtures and engine builders shared by the integration tests.

use quorate_core::{
    metrics::MetricsCollector,
    proxy::ProxyEngine,
    types::JsonRpcRequest,
    upstream::{Backend, Dispatcher, HttpBackend, HttpClient},
};
use serde_json::{json, Value};
use std::{sync::Arc, time::Duration};

use super::FakeBackend;

pub const TEST_ADDRESS: &str = "0x00000000219ab540356cbb839cbe05303d7705fa";

/// Engine over in-process fakes with the default tolerance of 3 blocks.
#[must_use]
pub fn engine_with(backends: &[Arc<FakeBackend>]) -> ProxyEngine {
    let backends = backends.iter().map(|b| Arc::clone(b) as Arc<dyn Backend>).collect();
    ProxyEngine::new(Dispatcher::new(backends), 3, Arc::new(MetricsCollector::new()))
}

/// Engine over HTTP backends pointing at `urls`.
///
/// # Panics
///
/// Panics if a URL is malformed.
#[must_use]
pub fn http_engine(urls: &[String]) -> ProxyEngine {
    let client = Arc::new(HttpClient::new().expect("http client"));
    let backends = urls
        .iter()
        .map(|url| {
            let backend = HttpBackend::new(url, Duration::from_secs(5), Arc::clone(&client))
                .expect("valid url");
            Arc::new(backend) as Arc<dyn Backend>
        })
        .collect();
    ProxyEngine::new(Dispatcher::new(backends), 3, Arc::new(MetricsCollector::new()))
}

#[must_use]
pub fn rpc(method: &str, params: Value) -> JsonRpcRequest {
    JsonRpcRequest::new(method, Some(params), json!(1))
}

#[must_use]
pub fn quantity(value: u64) -> Value {
    Value::String(format!("0x{value:x}"))
}

#[must_use]
pub fn create_test_transaction(block_number: u64, index: u64) -> Value {
    json!({
        "hash": format!("0x{:064x}", block_number * 1000 + index),
        "nonce": format!("0x{index:x}"),
        "blockHash": format!("0x{block_number:064x}"),
        "blockNumber": format!("0x{block_number:x}"),
        "transactionIndex": format!("0x{index:x}"),
        "from": "0x0000000000000000000000000000000000000001",
        "to": "0x0000000000000000000000000000000000000002",
        "value": "0x0",
        "gas": "0x5208",
        "gasPrice": "0x1",
        "input": "0x",
        "type": "0x0",
        "v": "0x25",
        "r": "0x1",
        "s": "0x2"
    })
}

#[must_use]
pub fn create_test_block(block_number: u64, tx_count: u64) -> Value {
    let transactions: Vec<Value> =
        (0..tx_count).map(|i| json!(format!("0x{:064x}", block_number * 1000 + i))).collect();

    json!({
        "number": format!("0x{block_number:x}"),
        "hash": format!("0x{block_number:064x}"),
        "parentHash": format!("0x{:064x}", block_number.saturating_sub(1)),
        "nonce": "0x0000000000000000",
        "sha3Uncles": format!("0x{}", "1d".repeat(32)),
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "transactionsRoot": format!("0x{}", "56".repeat(32)),
        "stateRoot": format!("0x{}", "d7".repeat(32)),
        "receiptsRoot": format!("0x{}", "56".repeat(32)),
        "miner": "0x0000000000000000000000000000000000000000",
        "difficulty": "0x0",
        "extraData": "0x",
        "size": "0x220",
        "gasLimit": "0x1c9c380",
        "gasUsed": "0x0",
        "timestamp": format!("0x{:x}", 1_600_000_000 + block_number),
        "transactions": transactions,
        "uncles": [],
        "baseFeePerGas": "0x7"
    })
}

#[must_use]
pub fn create_test_receipt(block_number: u64, status: u64) -> Value {
    json!({
        "transactionHash": format!("0x{:064x}", block_number * 1000),
        "transactionIndex": "0x0",
        "blockHash": format!("0x{block_number:064x}"),
        "blockNumber": format!("0x{block_number:x}"),
        "from": "0x0000000000000000000000000000000000000001",
        "to": "0x0000000000000000000000000000000000000002",
        "cumulativeGasUsed": "0x5208",
        "gasUsed": "0x5208",
        "contractAddress": null,
        "logs": [],
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "status": format!("0x{status:x}")
    })
}
