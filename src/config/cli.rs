use crate::config::ClientConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "docgen")]
#[command(about = "Command-line client for the document generation API")]
pub struct CliArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Backend base URL, including the /api base path
    #[arg(long)]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List available templates
    Templates,
    /// Generate a document from a JSON payload (inline JSON or @file)
    Generate { payload: String },
    /// Upload a file for parsing
    Upload { path: PathBuf },
    /// Show the preview of a template
    Preview { template_id: String },
    /// Download a generated document
    Download {
        filename: String,
        /// Where to write the document (defaults to the requested file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the fields of a document type
    Fields { type_id: String },
    /// Ask the backend to suggest a title (inline JSON or @file)
    Title { payload: String },
    /// Ask the backend to draft content (inline JSON or @file)
    Content { payload: String },
}

impl CliArgs {
    /// File values first, then command line overrides.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }

        Ok(config)
    }
}
