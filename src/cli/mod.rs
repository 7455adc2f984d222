//! Command-line interface for lab-ingest.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **process**: Parse, validate and summarise one or more files
//! - **detect**: Show which format a filename would be processed as
//! - **serve**: Start the HTTP upload endpoint
//!
//! ## Usage
//!
//! ```text
//! # Process a single file
//! lab-ingest process reads.fastq.gz
//!
//! # Several files with a tighter size limit
//! lab-ingest process plate1.csv plate2.csv --max-file-size 1048576
//!
//! # JSON output for scripting
//! lab-ingest --format json process run_report.json
//!
//! # Only accept sequence files
//! lab-ingest process *.fa --allow fa --allow fasta
//!
//! # Start the upload endpoint
//! lab-ingest serve --port 8080 --open
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::processing::config::ProcessingConfig;

pub mod detect;
pub mod process;

#[derive(Parser)]
#[command(name = "lab-ingest")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Parse, validate and summarise laboratory data files")]
#[command(
    long_about = "lab-ingest takes laboratory data files (FASTA, FASTQ, CSV, JSON, XML, text) and reports what they contain.\n\nFor every file it provides:\n- The detected format and parsed content\n- Line-numbered validation errors and warnings with a quality score\n- Insights and recommendations for next steps"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse and validate files
    Process(process::ProcessArgs),

    /// Show the format a file would be processed as
    Detect(detect::DetectArgs),

    /// Start the web server
    Serve(ServeArgs),
}

/// Options shared by every command that builds a processing config
#[derive(clap::Args, Debug, Default)]
pub struct ConfigArgs {
    /// JSON file with processing settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Reject files larger than this many bytes
    #[arg(long)]
    pub max_file_size: Option<u64>,

    /// Allowed extension, replacing the configured list (repeatable)
    #[arg(long = "allow", value_name = "EXT")]
    pub allow: Vec<String>,
}

impl ConfigArgs {
    /// Load the config file if given, then apply command-line overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn resolve(&self) -> anyhow::Result<ProcessingConfig> {
        let mut config = match &self.config {
            Some(path) => ProcessingConfig::load_from_file(path)?,
            None => ProcessingConfig::default(),
        };

        if let Some(max) = self.max_file_size {
            config = config.with_max_file_size(max);
        }
        if !self.allow.is_empty() {
            config = config.with_supported_formats(self.allow.iter().cloned());
        }
        Ok(config)
    }
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
