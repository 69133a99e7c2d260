pub mod init;
pub mod status;
pub mod transactions;
pub mod upload;

use clap::{Parser, Subcommand};

use crate::context::AppContext;
use crate::error::Result;
use crate::settings::load_settings;

pub(crate) fn load_context(data_dir: Option<&str>) -> Result<AppContext> {
    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = dir.to_string();
    }
    AppContext::open(settings)
}

#[derive(Parser)]
#[command(name = "bankfeed", about = "CSV bank-transaction ingest, dedup, and query service core.")]
pub struct Cli {
    /// Override the configured data directory for this invocation.
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up bankfeed: write settings and create the database.
    Init,
    /// Upload a CSV file through the full service boundary.
    Upload {
        /// Path to the CSV file to upload
        file: String,
        /// Content type presented to the service
        #[arg(long = "content-type", default_value = "text/csv")]
        content_type: String,
        /// API key presented to the service (default: the configured key)
        #[arg(long = "api-key")]
        api_key: Option<String>,
        /// Client id counted against the rate limit
        #[arg(long, default_value = "cli")]
        client: String,
    },
    /// List stored transactions, newest first.
    Transactions {
        /// Start date, YYYY-MM-DD inclusive (default: 30 days ago)
        #[arg(long)]
        from: Option<String>,
        /// End date, YYYY-MM-DD inclusive
        #[arg(long)]
        to: Option<String>,
        /// Page number, 1-based
        #[arg(long, default_value_t = 1)]
        page: i64,
        /// Rows per page (1-200)
        #[arg(long, default_value_t = 50)]
        limit: i64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show service health and store statistics.
    Status,
}
