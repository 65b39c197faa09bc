use anyhow::Result;
use clap::{Arg, Command};
use std::sync::Arc;
use tracing::{info, warn};

use coverage_analyzer_rust::api::start_http_server;
use coverage_analyzer_rust::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("coverage_analyzer_rust=info,warn")
        .init();

    let matches = Command::new("Topic Coverage Analyzer")
        .version("0.1.0")
        .about("Scores how well a YouTube video's transcript covers a set of subtopics")
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Port for the HTTP API (overrides config and PORT)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to a TOML configuration file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("verbose") {
        info!("Verbose logging enabled");
    }

    // Load configuration
    let config = match matches.get_one::<String>("config") {
        Some(path) => Config::from_file(path)?,
        None => Config::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }),
    };
    config.validate()?;

    let port = matches
        .get_one::<String>("port")
        .map(|p| p.parse::<u16>())
        .transpose()?
        .unwrap_or(config.server.port);

    info!("🚀 Topic Coverage Analyzer starting...");
    info!("{}", config.summary());

    start_http_server(Arc::new(config), port).await
}
