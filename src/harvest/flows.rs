//! End-to-end flows
//!
//! Each flow wires the listing stage, the two fan-out stages, and an output
//! sink into one pipeline run and returns a [`HarvestReport`].

use super::{HarvestReport, ItemFetcher, ItemResolver, Pipeline};
use crate::api::{farms, inspections, notes, Farm, LatestInspection};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::sink::{CsvSink, FileSink};
use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Fixed column schema of the findings CSV
pub const FINDINGS_COLUMNS: &[&str] = &[
    "anomaly",
    "anomaly_count",
    "est_affected_dc_kw",
    "est_affected_dc_percent",
    "est_annual_impact_kw_h",
    "est_annual_impact_dollars",
    "module_count",
    "farm_name",
    "inspection_id",
];

/// Stage 1 of both export flows: farm -> newest inspection
struct LatestInspectionResolver<'a> {
    client: &'a HttpClient,
    config: &'a ApiConfig,
}

#[async_trait]
impl ItemResolver for LatestInspectionResolver<'_> {
    type Parent = Farm;
    type Resolved = LatestInspection;

    async fn resolve(&self, farm: &Farm) -> Result<Option<LatestInspection>> {
        inspections::latest_for_farm(self.client, self.config, farm).await
    }
}

/// Stage 2 of the findings export: inspection -> stamped findings
struct FindingsFetcher<'a> {
    client: &'a HttpClient,
    config: &'a ApiConfig,
}

#[async_trait]
impl ItemFetcher for FindingsFetcher<'_> {
    type Input = LatestInspection;
    type Payload = Vec<Value>;

    async fn fetch(&self, item: &LatestInspection) -> Result<Vec<Value>> {
        inspections::findings(self.client, self.config, item).await
    }
}

/// Stage 2 of the map-export download: inspection -> archive bytes
struct MapExportFetcher<'a> {
    client: &'a HttpClient,
    config: &'a ApiConfig,
}

#[async_trait]
impl ItemFetcher for MapExportFetcher<'_> {
    type Input = LatestInspection;
    type Payload = (u64, Option<Bytes>);

    async fn fetch(&self, item: &LatestInspection) -> Result<(u64, Option<Bytes>)> {
        let content =
            inspections::map_export(self.client, self.config, item.inspection_id).await?;
        if content.is_none() {
            warn!(inspection = item.inspection_id, "no map export available");
        }
        Ok((item.inspection_id, content))
    }
}

/// Export the findings of every farm's latest inspection to a CSV file.
pub async fn export_findings(
    client: &HttpClient,
    config: &ApiConfig,
    output: impl AsRef<Path>,
) -> Result<HarvestReport> {
    let started = Instant::now();
    let mut report = HarvestReport::new();

    let farm_list = farms::list_farms(client, config).await?;
    report.farms_listed = farm_list.len();
    info!(farms = farm_list.len(), "resolving latest inspections");

    // Header goes out before the fan-out stages; data rows land only after
    // both stages succeeded, so a failed batch leaves zero rows behind.
    let mut sink = CsvSink::create(output.as_ref(), FINDINGS_COLUMNS)?;

    let pipeline = Pipeline::new(
        LatestInspectionResolver { client, config },
        FindingsFetcher { client, config },
    );
    let run = pipeline.run(&farm_list).await?;
    report.resolved = run.resolved;
    report.skipped = run.skipped;
    report.fetched = run.payloads.len();

    for batch in &run.payloads {
        report.rows_written += sink.append_records(batch)?;
    }
    sink.finish()?;

    let report = report.finish(started.elapsed());
    info!(%report, path = %output.as_ref().display(), "findings export complete");
    Ok(report)
}

/// Download the map-export archive of every farm's latest inspection into
/// a directory, one `<inspection_id>.zip` per inspection.
pub async fn download_map_exports(
    client: &HttpClient,
    config: &ApiConfig,
    output_dir: impl AsRef<Path>,
) -> Result<HarvestReport> {
    let started = Instant::now();
    let mut report = HarvestReport::new();

    let farm_list = farms::list_farms(client, config).await?;
    report.farms_listed = farm_list.len();
    info!(farms = farm_list.len(), "resolving latest inspections");

    let mut sink = FileSink::new(output_dir.as_ref(), "zip")?;

    let pipeline = Pipeline::new(
        LatestInspectionResolver { client, config },
        MapExportFetcher { client, config },
    );
    let run = pipeline.run(&farm_list).await?;
    report.resolved = run.resolved;
    report.skipped = run.skipped;
    report.fetched = run.payloads.len();

    for (inspection_id, content) in &run.payloads {
        if let Some(content) = content {
            sink.write_blob(inspection_id, content)?;
            report.files_written += 1;
        }
    }

    let report = report.finish(started.elapsed());
    info!(%report, dir = %output_dir.as_ref().display(), "map-export download complete");
    Ok(report)
}

/// Retrieve the geojson objects of one type for a farm looked up by name.
pub async fn export_geojson(
    client: &HttpClient,
    config: &ApiConfig,
    farm_name: &str,
    object_type: &str,
    limit: u32,
) -> Result<Vec<Value>> {
    let farm = farms::farm_by_name(client, config, farm_name).await?;
    let summary = farms::farm_summary(client, config, farm.id).await?;
    info!(farm = %farm.name, rows = summary.rows, "retrieving {object_type} objects");

    farms::objects_geojson(client, config, farm.id, object_type, limit, summary.rows).await
}

/// Create an equipment note and, optionally, upload and associate one file.
///
/// A failed association is reported, not retried: the file already sits in
/// storage by then. Returns the note id.
pub async fn attach_note_file(
    client: &HttpClient,
    config: &ApiConfig,
    farm_id: u64,
    equipment_id: u64,
    title: &str,
    body: &str,
    file: Option<&Path>,
) -> Result<u64> {
    let note = notes::create_note(client, config, farm_id, equipment_id, title, body).await?;
    info!(note = note.id, "created note");

    let Some(path) = file else {
        return Ok(note.id);
    };

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::config(format!("invalid file name: {}", path.display())))?;
    let content = std::fs::read(path)?;
    let filesize = content.len() as u64;

    let session = notes::create_upload_session(client, config, 1).await?;
    let link = notes::create_storage_link(client, config, session.id, filename, filesize).await?;
    notes::upload_to_storage(client, &link, filename, content).await?;

    let status = notes::attach_files(
        client,
        config,
        farm_id,
        equipment_id,
        note.id,
        &[(link.file_id, filename.to_string())],
    )
    .await?;

    if status.is_success() {
        info!(file = filename, note = note.id, "file associated to note");
    } else {
        warn!(
            status = status.as_u16(),
            "file uploaded but association failed"
        );
    }
    Ok(note.id)
}
