//! Authentication
//!
//! Exchanges client credentials for a bearer token and caches it for the
//! provider's lifetime. Pre-obtained bearer tokens are passed through as-is.

mod provider;

pub use provider::{CachedToken, TokenProvider};

#[cfg(test)]
mod tests;
