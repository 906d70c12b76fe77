//! CLI entry point for the fontdl tool.

use anyhow::{Context, Result};
use clap::Parser;
use fontdl_core::{BROWSER_USER_AGENT, FontDownloader, FontRequest, HttpClient};
use tracing::{debug, info};

mod app_config;
mod cli;

use app_config::load_default_file_config;
use cli::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help and usage errors work without logs)
    let args = Args::parse();
    let loaded_config = load_default_file_config()?;

    // Priority: RUST_LOG env var > quiet flag > verbose flag > config verbosity > info
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => loaded_config
                .verbosity()
                .map_or("info", app_config::VerbositySetting::log_level),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, config_path = ?loaded_config.path, "CLI arguments parsed");

    let user_agent = loaded_config.user_agent().unwrap_or(BROWSER_USER_AGENT);
    let client = HttpClient::with_user_agent(user_agent).context("Failed to set up HTTP client")?;
    let options = loaded_config.download_options(args.naming);
    let request = FontRequest::new(args.font_name, loaded_config.output_dir(args.output_dir));

    let downloader = FontDownloader::new(client, options);
    let summary = downloader.run(&request).await?;

    info!(
        downloaded = summary.downloaded.len(),
        skipped = summary.skipped.len(),
        "Done"
    );

    Ok(())
}
