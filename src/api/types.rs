//! Payload types for the endpoints the code reads fields from

use crate::types::StringMap;
use serde::{Deserialize, Serialize};

/// A solar farm, as listed by the farms collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farm {
    /// Numeric farm id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Farm uuid, present on newer API responses
    #[serde(default)]
    pub uuid: Option<String>,
}

/// An inspection of a farm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    /// Numeric inspection id
    pub id: u64,
    /// Last-update timestamp, epoch seconds
    pub updated_tsecs: i64,
}

/// A farm paired with its most recently updated inspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestInspection {
    /// Parent farm id
    pub farm_id: u64,
    /// Parent farm name, stamped onto findings
    pub farm_name: String,
    /// Id of the newest inspection
    pub inspection_id: u64,
}

/// Response envelope of the sorted-farms lookup
#[derive(Debug, Deserialize)]
pub(crate) struct SortedFarms {
    pub farms: Vec<Farm>,
}

/// Farm summary; only the row count is read
#[derive(Debug, Clone, Deserialize)]
pub struct FarmSummary {
    /// Number of row objects on the farm
    pub rows: u64,
}

/// A created equipment note
#[derive(Debug, Clone, Deserialize)]
pub struct Note {
    /// Note id, used to associate uploaded files
    pub id: u64,
}

/// Response envelope of upload-session creation
#[derive(Debug, Deserialize)]
pub(crate) struct UploadSessionEnvelope {
    pub upload_session: UploadSession,
}

/// A file upload session
#[derive(Debug, Clone, Deserialize)]
pub struct UploadSession {
    /// Session id, referenced by the storage-link request
    pub id: u64,
}

/// Pre-signed storage location for one file upload
#[derive(Debug, Clone, Deserialize)]
pub struct StorageLink {
    /// File id to associate with the note after upload
    pub file_id: u64,
    /// The pre-signed POST target
    pub post: PresignedPost,
}

/// Pre-signed POST: URL plus the form fields that must accompany the file
#[derive(Debug, Clone, Deserialize)]
pub struct PresignedPost {
    /// Upload URL (authorization is embedded)
    pub url: String,
    /// Form fields to send alongside the file part
    pub fields: StringMap,
}

/// Remote-file ingestion request
#[derive(Debug, Clone, Serialize)]
pub struct IngestRequest {
    /// URLs of the datasets to ingest
    pub data_url: Vec<String>,
    /// Human-readable session name
    pub upload_session_name: String,
    /// Processing pipeline identifier
    pub pipeline: String,
    /// Order the ingestion belongs to
    pub order_id: u64,
}
