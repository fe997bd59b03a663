//! Equipment notes and file upload endpoints
//!
//! Creating a note with an attachment is a five-step sequence: create the
//! note, open an upload session, request a pre-signed storage link, upload
//! the file to storage, and associate the uploaded file with the note.

use super::types::{Note, StorageLink, UploadSession, UploadSessionEnvelope};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use reqwest::{Method, StatusCode};
use serde_json::json;
use tracing::info;

/// Create a note on a piece of equipment.
pub async fn create_note(
    client: &HttpClient,
    config: &ApiConfig,
    farm_id: u64,
    equipment_id: u64,
    title: &str,
    body: &str,
) -> Result<Note> {
    client
        .post_json(
            &format!("/solar_farms/{farm_id}/equipment/{equipment_id}/notes"),
            RequestConfig::new()
                .query("org_id", config.org_id.as_str())
                .json(json!({ "title": title, "body": body })),
        )
        .await
}

/// Open an upload session for the given number of files.
pub async fn create_upload_session(
    client: &HttpClient,
    config: &ApiConfig,
    file_total: u32,
) -> Result<UploadSession> {
    let envelope: UploadSessionEnvelope = client
        .post_json(
            "/v2/feature_upload_session",
            RequestConfig::new()
                .query("org_id", config.org_id.as_str())
                .json(json!({ "file_total": file_total })),
        )
        .await?;
    Ok(envelope.upload_session)
}

/// Request a pre-signed storage location for one file of a session.
pub async fn create_storage_link(
    client: &HttpClient,
    config: &ApiConfig,
    upload_session_id: u64,
    filename: &str,
    filesize: u64,
) -> Result<StorageLink> {
    client
        .post_json(
            "/v2/feature_upload_session/s3_link",
            RequestConfig::new()
                .query("org_id", config.org_id.as_str())
                .json(json!({
                    "upload_session_id": upload_session_id,
                    "filename": filename,
                    "filesize": filesize,
                })),
        )
        .await
}

/// Upload file content to the pre-signed storage location.
///
/// The storage service answers 204 on success; anything else is an error.
pub async fn upload_to_storage(
    client: &HttpClient,
    link: &StorageLink,
    filename: &str,
    content: Vec<u8>,
) -> Result<()> {
    let status = client
        .post_multipart(&link.post.url, &link.post.fields, filename, content)
        .await?;
    info!(status = status.as_u16(), "file upload status");

    if status == StatusCode::NO_CONTENT {
        Ok(())
    } else {
        Err(Error::http_status(
            status.as_u16(),
            "pre-signed upload did not return 204",
        ))
    }
}

/// Associate uploaded files with a note.
///
/// Returns the response status instead of failing on non-success: by the
/// time this runs the file already sits in storage, so the caller reports
/// a failed association rather than retrying it.
pub async fn attach_files(
    client: &HttpClient,
    config: &ApiConfig,
    farm_id: u64,
    equipment_id: u64,
    note_id: u64,
    files: &[(u64, String)],
) -> Result<StatusCode> {
    let payload = json!({
        "files": files
            .iter()
            .map(|(file_id, file_name)| json!({ "file_id": file_id, "file_name": file_name }))
            .collect::<Vec<_>>(),
    });

    let response = client
        .request_raw(
            Method::POST,
            &format!("/solar_farms/{farm_id}/equipment/{equipment_id}/notes/{note_id}/files"),
            RequestConfig::new()
                .query("org_id", config.org_id.as_str())
                .json(payload),
        )
        .await?;
    Ok(response.status())
}
