mod api;
mod cli;
mod context;
mod dates;
mod db;
mod error;
mod fingerprint;
mod importer;
mod limiter;
mod models;
mod query;
mod settings;

use std::io::stderr;

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use cli::{Cli, Commands};

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::WARN,
    }
}

fn setup_logging() {
    // Tables and JSON go to stdout, so logging stays on stderr.
    let level = std::env::var("BANKFEED_LOG")
        .map(|s| parse_log_level(&s))
        .unwrap_or(LevelFilter::WARN);
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry().with(terminal_log).init();
}

fn main() {
    setup_logging();
    let cli = Cli::parse();
    let data_dir = cli.data_dir.as_deref();

    let result = match cli.command {
        Commands::Init => cli::init::run(data_dir),
        Commands::Upload {
            file,
            content_type,
            api_key,
            client,
        } => cli::upload::run(&file, &content_type, api_key.as_deref(), &client, data_dir),
        Commands::Transactions {
            from,
            to,
            page,
            limit,
            json,
        } => cli::transactions::run(from, to, page, limit, json, data_dir),
        Commands::Status => cli::status::run(data_dir),
    };

    if let Err(e) = result {
        // {:#} prints the whole context chain on one line.
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
