//! Inspection endpoints

use super::types::{Farm, Inspection, LatestInspection};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::harvest::select_latest;
use crate::http::{HttpClient, RequestConfig};
use bytes::Bytes;
use chrono::{TimeZone, Utc};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

/// List all inspections of a farm.
pub async fn list_for_farm(
    client: &HttpClient,
    config: &ApiConfig,
    farm_id: u64,
) -> Result<Vec<Inspection>> {
    client
        .get_json_with_config(
            &format!("/v2/solar_farms/{farm_id}/solar_inspections"),
            RequestConfig::new().query("org_id", config.org_id.as_str()),
        )
        .await
}

/// List all inspections of a farm through the legacy uuid-based API.
///
/// Records pass through untyped; callers print or persist them as-is.
pub async fn list_for_farm_uuid(
    client: &HttpClient,
    config: &ApiConfig,
    farm_uuid: &str,
) -> Result<Vec<Value>> {
    let url = format!(
        "{}/solar_farms/{farm_uuid}/solar_inspections",
        config.legacy_base_url
    );
    client
        .get_json_with_config(
            &url,
            RequestConfig::new().query("org_id", config.org_id.as_str()),
        )
        .await
}

/// Resolve a farm to its most recently updated inspection.
///
/// Returns `None` for a farm with no inspections. When several inspections
/// share the maximum `updated_tsecs`, the first in response order wins.
pub async fn latest_for_farm(
    client: &HttpClient,
    config: &ApiConfig,
    farm: &Farm,
) -> Result<Option<LatestInspection>> {
    let inspections = list_for_farm(client, config, farm.id).await?;

    Ok(select_latest(&inspections, |i| i.updated_tsecs).map(|latest| {
        if let Some(updated) = Utc.timestamp_opt(latest.updated_tsecs, 0).single() {
            debug!(farm = %farm.name, inspection = latest.id, %updated, "latest inspection");
        }
        LatestInspection {
            farm_id: farm.id,
            farm_name: farm.name.clone(),
            inspection_id: latest.id,
        }
    }))
}

/// Fetch the findings of an inspection, stamped with the parent farm name
/// and the inspection id.
///
/// A 204 response means the inspection has no findings and yields an empty
/// list.
pub async fn findings(
    client: &HttpClient,
    config: &ApiConfig,
    item: &LatestInspection,
) -> Result<Vec<Value>> {
    let response = client
        .get_with_config(
            &format!("/v2/solar_inspections/{}/findings", item.inspection_id),
            RequestConfig::new().query("org_id", config.org_id.as_str()),
        )
        .await?;

    if response.status() == StatusCode::NO_CONTENT {
        return Ok(Vec::new());
    }

    let mut findings: Vec<Value> = response.json().await.map_err(Error::Http)?;
    for finding in &mut findings {
        if let Some(object) = finding.as_object_mut() {
            object.insert(
                "farm_name".to_string(),
                Value::String(item.farm_name.clone()),
            );
            object.insert("inspection_id".to_string(), Value::from(item.inspection_id));
        }
    }
    Ok(findings)
}

/// Download the map-export archive of an inspection.
///
/// A 204 response means no export exists and yields `None`.
pub async fn map_export(
    client: &HttpClient,
    config: &ApiConfig,
    inspection_id: u64,
) -> Result<Option<Bytes>> {
    let response = client
        .get_with_config(
            &format!("/v2/solar_inspections/{inspection_id}/exports/map_exports"),
            RequestConfig::new().query("org_id", config.org_id.as_str()),
        )
        .await?;

    if response.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let content = response.bytes().await.map_err(Error::Http)?;
    Ok(Some(content))
}
