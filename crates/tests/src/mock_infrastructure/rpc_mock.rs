//! RPC mock builder for Ethereum JSON-RPC testing.
//!
//! Wraps mockito and matches requests by method name.

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};

pub struct RpcMockBuilder {
    server: ServerGuard,
    mocks: Vec<Mock>,
    expectations: Vec<Mock>,
}

fn method_matcher(method: &str) -> Matcher {
    Matcher::Regex(format!(r#""method"\s*:\s*"{method}""#))
}

impl RpcMockBuilder {
    pub async fn new() -> Self {
        Self { server: Server::new_async().await, mocks: Vec::new(), expectations: Vec::new() }
    }

    #[must_use]
    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Answers every call of `method` with `result`.
    pub fn mock_result(&mut self, method: &str, result: &Value) -> &mut Self {
        let mock = self
            .server
            .mock("POST", "/")
            .match_body(method_matcher(method))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"jsonrpc": "2.0", "id": 1, "result": result}).to_string())
            .create();

        self.mocks.push(mock);
        self
    }

    /// Answers calls of `method` whose body also matches `params_regex`.
    pub fn mock_result_for_params(
        &mut self,
        method: &str,
        params_regex: &str,
        result: &Value,
    ) -> &mut Self {
        let params = Matcher::Regex(params_regex.to_string());
        let mock = self
            .server
            .mock("POST", "/")
            .match_body(Matcher::AllOf(vec![method_matcher(method), params]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"jsonrpc": "2.0", "id": 1, "result": result}).to_string())
            .create();

        self.mocks.push(mock);
        self
    }

    pub fn mock_block_number(&mut self, block_number: u64) -> &mut Self {
        self.mock_result("eth_blockNumber", &json!(format!("0x{block_number:x}")))
    }

    /// Answers `method` with a JSON-RPC error object.
    pub fn mock_rpc_error(&mut self, method: &str, code: i32, message: &str) -> &mut Self {
        let mock = self
            .server
            .mock("POST", "/")
            .match_body(method_matcher(method))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"jsonrpc": "2.0", "id": 1, "error": {"code": code, "message": message}})
                    .to_string(),
            )
            .create();

        self.mocks.push(mock);
        self
    }

    /// Answers every request with a bare HTTP status.
    pub fn mock_http_status(&mut self, status: usize) -> &mut Self {
        let mock =
            self.server.mock("POST", "/").with_status(status).with_body("unavailable").create();
        self.mocks.push(mock);
        self
    }

    /// Answers exactly `hits` requests with a bare HTTP status.
    pub fn expect_http_status(&mut self, status: usize, hits: usize) -> &mut Self {
        let mock = self
            .server
            .mock("POST", "/")
            .with_status(status)
            .with_body("unavailable")
            .expect(hits)
            .create();
        self.expectations.push(mock);
        self
    }

    /// Expects exactly `hits` calls of `method` and answers them with `result`.
    pub fn expect_calls(&mut self, method: &str, result: &Value, hits: usize) -> &mut Self {
        let mock = self
            .server
            .mock("POST", "/")
            .match_body(method_matcher(method))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"jsonrpc": "2.0", "id": 1, "result": result}).to_string())
            .expect(hits)
            .create();

        self.expectations.push(mock);
        self
    }

    /// Panics if an expectation set with [`Self::expect_calls`] was not met.
    pub fn assert(&self) {
        for mock in &self.expectations {
            mock.assert();
        }
    }
}
