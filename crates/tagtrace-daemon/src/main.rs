//! TagTrace Daemon - Real-time RFID presence service
//!
//! The daemon provides:
//! - Detection ingest from RFID reader hardware
//! - A last-write-wins device location ledger
//! - Per-reader presence views with sliding-window expiry
//! - SSE live sessions that push refreshed views on every change

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod bus;
mod config;
mod error;
mod ingest;
mod presence;
mod seed;
mod server;

use crate::config::DaemonConfig;
use crate::error::DaemonResult;
use crate::server::Server;

/// TagTrace Daemon CLI
#[derive(Parser)]
#[command(name = "tagtraced")]
#[command(about = "TagTrace Daemon - Real-time RFID presence service", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "TAGTRACE_CONFIG")]
    config: Option<String>,

    /// Listen address
    #[arg(
        short,
        long,
        env = "TAGTRACE_LISTEN_ADDR",
        default_value = "127.0.0.1:8080"
    )]
    listen: String,

    /// Registry seed file (readers and devices, JSON)
    #[arg(short, long, env = "TAGTRACE_SEED")]
    seed: Option<String>,

    /// Log level
    #[arg(long, env = "TAGTRACE_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "TAGTRACE_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = DaemonConfig::load(cli.config.as_deref())
        .map_err(|e| error::DaemonError::Config(e.to_string()))?;

    // Override with CLI args
    config.server.listen_addr = cli
        .listen
        .parse()
        .map_err(|e| error::DaemonError::Config(format!("Invalid listen address: {}", e)))?;

    if cli.seed.is_some() {
        config.registry.seed = cli.seed;
    }

    config.logging.level = cli.log_level;
    config.logging.json |= cli.json;

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // Print startup banner
    println!(
        r#"
  _____             _____
 |_   _|_ _  __ _  |_   _| __ __ _  ___ ___
   | |/ _` |/ _` |   | || '__/ _` |/ __/ _ \
   | | (_| | (_| |   | || | | (_| | (_|  __/
   |_|\__,_|\__, |   |_||_|  \__,_|\___\___|
            |___/

  TagTrace - Real-time RFID presence
  Version: {}
  Listening: {}
"#,
        env!("CARGO_PKG_VERSION"),
        config.server.listen_addr
    );

    // Create and run server
    let server = Server::new(config)?;
    server.run().await
}
