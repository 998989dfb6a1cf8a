//! # Quorate Core
//!
//! Core library of the quorate Ethereum JSON-RPC aggregation proxy. Every request is sent to
//! every configured backend node and only an answer the backends agree on is returned.
//!
//! - **[`wire`]**: hex-encoded JSON-RPC value codec and the composite chain records
//! - **[`equality`]**: structural equality used to decide whether two answers are the same
//! - **[`upstream`]**: backend clients and the concurrent dispatcher
//! - **[`consensus`]**: resolvers that reduce the backend answers to one value
//! - **[`proxy`]**: method policy table and the request engine
//! - **[`config`]**, **[`metrics`]**: layered configuration and Prometheus metrics
//!
//! ## Request Flow
//!
//! ```text
//! Client Request
//!       │
//!       ▼
//! ┌─────────────┐
//! │  Validation │ ─── Invalid ──► Error Response
//! └──────┬──────┘
//!        ▼
//! ┌─────────────┐
//! │ Decode args │ ─── Malformed / earliest ──► Error Response
//! └──────┬──────┘
//!        ▼
//! ┌─────────────────┐
//! │ latest/pending? │ ─── yes ──► eth_blockNumber (median with offset)
//! └──────┬──────────┘
//!        ▼
//! ┌─────────────┐
//! │  Dispatcher │  one task per backend, wait for all
//! └──────┬──────┘
//!        ▼
//! ┌─────────────┐
//! │  Resolver   │ ─── No quorum ──► Consensus Error
//! └──────┬──────┘
//!        ▼
//!   Response to Client
//! ```

pub mod config;
pub mod consensus;
pub mod equality;
pub mod metrics;
pub mod middleware;
pub mod proxy;
pub mod types;
pub mod upstream;
pub mod wire;
