//! File-serving backend for the route-atlas viewer.
//!
//! Serves directory listings and file content out of a data directory:
//! GeoJSON layers, popup photos, and project description fragments. The
//! viewer treats each source independently, so this service stays
//! stateless and dumb on purpose.

mod listing;
mod server;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use server::ServerState;

#[derive(Parser, Debug)]
#[command(name = "atlas-api")]
#[command(about = "File-serving backend for the route-atlas map viewer")]
struct Args {
    /// Port to listen on
    #[arg(long, env = "ATLAS_PORT", default_value = "8080")]
    port: u16,

    /// Root directory served to the viewer
    #[arg(long, env = "ATLAS_DATA_ROOT", default_value = ".")]
    data_root: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(data_root = %args.data_root.display(), "Starting atlas-api");

    let state = Arc::new(ServerState {
        data_root: args.data_root,
    });

    server::run_server(state, args.port).await
}
