//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Batch-harvesting CLI for the solar inspection API
#[derive(Parser, Debug)]
#[command(name = "solar-harvest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Override the API base URL (e.g. for a staging environment)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the findings of every farm's latest inspection to CSV
    Findings {
        /// Target CSV file
        #[arg(short, long, default_value = "inspection_findings.csv")]
        output: PathBuf,
    },

    /// Download the map-export archive of every farm's latest inspection
    MapExports {
        /// Directory the archives are written into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Retrieve geojson objects for a farm looked up by name
    Geojson {
        /// Farm name
        #[arg(long)]
        farm: String,

        /// Object type to retrieve
        #[arg(long, default_value = "row")]
        object_type: String,

        /// Page size for the object listing
        #[arg(long, default_value = "10")]
        limit: u32,

        /// Write the pages to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create an equipment note, optionally with one file attachment
    CreateNote {
        /// Farm the equipment belongs to
        #[arg(long)]
        farm_id: u64,

        /// Equipment the note is attached to
        #[arg(long)]
        equipment_id: u64,

        /// Note title
        #[arg(long)]
        title: String,

        /// Note body
        #[arg(long)]
        body: String,

        /// File to upload and associate with the note
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Ingest remote datasets by URL
    Ingest {
        /// Dataset URL (repeatable)
        #[arg(long = "url", required = true)]
        urls: Vec<String>,

        /// Upload session name
        #[arg(long)]
        name: String,

        /// Processing pipeline
        #[arg(long, default_value = "om")]
        pipeline: String,

        /// Order the ingestion belongs to
        #[arg(long)]
        order_id: u64,
    },

    /// List the inspections of a farm looked up by name (legacy API)
    Inspections {
        /// Farm name
        #[arg(long)]
        farm: String,
    },
}
