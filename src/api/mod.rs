//! Vendor API operations
//!
//! Thin, typed wrappers over the demonstrated endpoints. Every call takes
//! the shared [`HttpClient`](crate::http::HttpClient) and
//! [`ApiConfig`](crate::config::ApiConfig); the `org_id` query parameter and
//! bearer authentication are applied uniformly. Payloads the code does not
//! read stay as raw `serde_json::Value` and pass through unchanged.

pub mod farms;
pub mod ingest;
pub mod inspections;
pub mod notes;

mod types;

pub use types::{
    Farm, FarmSummary, IngestRequest, Inspection, LatestInspection, Note, PresignedPost,
    StorageLink, UploadSession,
};
