//! Remote-file ingestion endpoint

use super::types::IngestRequest;
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use serde_json::Value;

/// Create an ingestor upload session pointing at remote datasets.
///
/// The ingestor service lives on the assets base URL, not the customer API.
/// The raw response body is returned for the caller to report.
pub async fn create_ingest_session(
    client: &HttpClient,
    config: &ApiConfig,
    request: &IngestRequest,
) -> Result<Value> {
    let url = format!("{}/api/v2/ingestor/upload_sessions", config.assets_base_url);
    let response = client
        .post_with_config(
            &url,
            RequestConfig::new()
                .query("org_id", config.org_id.as_str())
                .json(serde_json::to_value(request)?),
        )
        .await?;
    response.json().await.map_err(Error::Http)
}
