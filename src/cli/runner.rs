//! Command execution

use super::{Cli, Commands};
use crate::api::{farms, ingest, inspections, IngestRequest};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::harvest;
use crate::http::HttpClient;

/// Executes the parsed CLI command against the configured API
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the parsed arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build the config and client, then dispatch the subcommand
    pub async fn run(&self) -> Result<()> {
        let mut config = ApiConfig::from_env()?;
        if let Some(base) = &self.cli.base_url {
            config = config.with_api_base_url(base.as_str());
            config.validate()?;
        }
        let client = HttpClient::for_api(&config);

        match &self.cli.command {
            Commands::Findings { output } => {
                let report = harvest::export_findings(&client, &config, output).await?;
                println!(
                    "All finished: {} data rows at {} ({report})",
                    report.rows_written,
                    output.display(),
                );
            }

            Commands::MapExports { output_dir } => {
                let report = harvest::download_map_exports(&client, &config, output_dir).await?;
                println!(
                    "All finished: {} archives in {} ({report})",
                    report.files_written,
                    output_dir.display(),
                );
            }

            Commands::Geojson {
                farm,
                object_type,
                limit,
                output,
            } => {
                let pages =
                    harvest::export_geojson(&client, &config, farm, object_type, *limit).await?;
                let rendered = serde_json::to_string_pretty(&pages)?;
                match output {
                    Some(path) => {
                        std::fs::write(path, rendered)?;
                        println!("Wrote {} geojson pages to {}", pages.len(), path.display());
                    }
                    None => println!("{rendered}"),
                }
            }

            Commands::CreateNote {
                farm_id,
                equipment_id,
                title,
                body,
                file,
            } => {
                let note_id = harvest::attach_note_file(
                    &client,
                    &config,
                    *farm_id,
                    *equipment_id,
                    title,
                    body,
                    file.as_deref(),
                )
                .await?;
                println!("Created note {note_id}");
            }

            Commands::Ingest {
                urls,
                name,
                pipeline,
                order_id,
            } => {
                let request = IngestRequest {
                    data_url: urls.clone(),
                    upload_session_name: name.clone(),
                    pipeline: pipeline.clone(),
                    order_id: *order_id,
                };
                let response = ingest::create_ingest_session(&client, &config, &request).await?;
                println!("{}", serde_json::to_string_pretty(&response)?);
            }

            Commands::Inspections { farm } => {
                let farm_record = farms::farm_by_name(&client, &config, farm).await?;
                let uuid = farm_record
                    .uuid
                    .ok_or_else(|| Error::decode(format!("farm '{farm}' has no uuid")))?;
                let records = inspections::list_for_farm_uuid(&client, &config, &uuid).await?;
                println!("{}", serde_json::to_string_pretty(&records)?);
            }
        }

        Ok(())
    }
}
