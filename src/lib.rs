//! # solar-harvest
//!
//! Authenticated batch harvesting for the Raptor Maps solar inspection API.
//!
//! The crate consolidates a handful of API consumption flows — findings
//! CSV export, bulk map-export download, geojson retrieval, equipment-note
//! creation with file upload, and remote-file ingestion — around one
//! reusable pattern: list a paginated parent collection, concurrently
//! resolve each parent to its latest child resource, concurrently fetch
//! each resolved resource, and persist the results to a sink.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solar_harvest::config::ApiConfig;
//! use solar_harvest::harvest;
//! use solar_harvest::http::HttpClient;
//!
//! #[tokio::main]
//! async fn main() -> solar_harvest::Result<()> {
//!     let config = ApiConfig::from_env()?;
//!     let client = HttpClient::for_api(&config);
//!
//!     let report = harvest::export_findings(&client, &config, "findings.csv").await?;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Flows                               │
//! │  findings CSV    map exports    geojson    notes    ingest   │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌──────────┬──────────┬───────┴──────┬───────────┬────────────┐
//! │   Auth   │   HTTP   │    List      │  Harvest  │    Sink    │
//! ├──────────┼──────────┼──────────────┼───────────┼────────────┤
//! │ Bearer   │ GET/POST │ Offset pages │ Resolve   │ CSV        │
//! │ OAuth2   │ Retry    │ Range pages  │ Fetch     │ Files      │
//! │ Cache    │ Backoff  │ Sequential   │ Join-all  │            │
//! └──────────┴──────────┴──────────────┴───────────┴────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Configuration context
pub mod config;

/// Token provider
pub mod auth;

/// HTTP client with transport-level retry
pub mod http;

/// Paginated listing
pub mod list;

/// Two-stage fan-out pipeline and flows
pub mod harvest;

/// Output sinks (CSV, filesystem)
pub mod sink;

/// Vendor API operations
pub mod api;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
