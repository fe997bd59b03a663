//! HTTP client with transport-level retry
//!
//! One client instance (one connection pool) is shared by every concurrent
//! request in a fan-out stage. Retries are bounded with exponential backoff
//! and stay transparent to the stage logic above.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
