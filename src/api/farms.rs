//! Farm endpoints

use super::types::{Farm, FarmSummary, SortedFarms};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::list::Lister;
use serde_json::Value;

/// List every farm of the organization, across all pages.
pub async fn list_farms(client: &HttpClient, config: &ApiConfig) -> Result<Vec<Farm>> {
    Lister::new()
        .fetch_all(
            client,
            "/v2/solar_farms",
            RequestConfig::new().query("org_id", config.org_id.as_str()),
        )
        .await
}

/// Look up a farm by name via the sorted-farms endpoint.
///
/// The first match wins, matching the lookup the name-based flows perform.
pub async fn farm_by_name(client: &HttpClient, config: &ApiConfig, name: &str) -> Result<Farm> {
    let response: SortedFarms = client
        .get_json_with_config(
            "/sorted_solar_farms",
            RequestConfig::new()
                .query("org_id", config.org_id.as_str())
                .query("name", name),
        )
        .await?;

    response
        .farms
        .into_iter()
        .next()
        .ok_or_else(|| Error::decode(format!("no farm named '{name}'")))
}

/// Fetch the summary of a farm; only the row count is used.
pub async fn farm_summary(
    client: &HttpClient,
    config: &ApiConfig,
    farm_id: u64,
) -> Result<FarmSummary> {
    client
        .get_json_with_config(
            &format!("/solar_farms/{farm_id}/summary"),
            RequestConfig::new().query("org_id", config.org_id.as_str()),
        )
        .await
}

/// Retrieve geojson objects of one type for a farm, paged by offset/limit
/// up to the known total. Each page body is returned as one element.
pub async fn objects_geojson(
    client: &HttpClient,
    config: &ApiConfig,
    farm_id: u64,
    object_type: &str,
    limit: u32,
    total: u64,
) -> Result<Vec<Value>> {
    Lister::new()
        .fetch_range(
            client,
            &format!("/solar_farms/{farm_id}/objects/geojson"),
            RequestConfig::new()
                .query("org_id", config.org_id.as_str())
                .query("object_type", object_type),
            limit,
            total,
        )
        .await
}
