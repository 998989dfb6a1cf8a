//! Mock backends for exercising the proxy without real nodes.
//!
//! - [`RpcMockBuilder`]: a mockito HTTP server speaking Ethereum JSON-RPC
//! - [`FakeBackend`]: an in-process [`quorate_core::upstream::Backend`] with scripted answers
//! - fixtures for blocks, transactions and receipts
//!
//! ```ignore
//! use tests::mock_infrastructure::RpcMockBuilder;
//!
//! let mut mock = RpcMockBuilder::new().await;
//! mock.mock_block_number(100);
//! // connect an HttpBackend to mock.url()
//! ```

pub mod rpc_mock;
pub mod test_helpers;

pub use fake_backend::{FakeBackend, FakeReply};
pub use rpc_mock::RpcMockBuilder;
pub use test_helpers::*;
