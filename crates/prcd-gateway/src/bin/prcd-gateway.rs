//! PRCD Gateway Binary
//!
//! Loads a prcd directory and serves it over HTTP.
//!
//! # Usage
//! ```bash
//! prcd-gateway [--address 127.0.0.1:30666] [--config prcd.toml] [--verbose] <DATA_DIR>
//! ```

use anyhow::Context;
use clap::Parser;
use prcd_gateway::{Gateway, GatewayConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// PRCD Gateway - random quotations over HTTP
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing prcd_*.txt files
    data_dir: PathBuf,

    /// Address to bind to [default: 127.0.0.1:30666]
    #[arg(short, long)]
    address: Option<String>,

    /// Configuration file (JSON or TOML); command line flags win
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG overrides the level picked by --verbose
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(args.verbose)
        .with_thread_ids(args.verbose)
        .init();

    let config = match &args.config {
        Some(path) => GatewayConfig::from_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => GatewayConfig::default(),
    };
    let config = match &args.address {
        Some(address) => config.with_address(address).context("Invalid --address")?,
        None => config,
    };
    let config = config.with_data_dir(args.data_dir.clone());

    let gateway = Gateway::load(config)
        .with_context(|| format!("Failed to load prcd directory {}", args.data_dir.display()))?;

    print_banner(&gateway);

    gateway.start().await?;

    Ok(())
}

fn print_banner(gateway: &Gateway) {
    let state = gateway.state();
    println!();
    println!("PRCD Gateway");
    println!("   ├─ http://{}:{}", state.config.host, state.config.port);
    println!(
        "   └─ {} sections, {} entries",
        state.grimoire.len(),
        state.grimoire.total_entries()
    );
    println!();
    println!("HTTP Endpoints");
    println!("   ├─ GET  /prcd            — Random quotation");
    println!("   ├─ GET  /prcd/:section   — Quotation from a section");
    println!("   ├─ GET  /sections        — Section list");
    println!("   ├─ GET  /health          — Health check");
    println!("   └─ GET  /status          — Gateway status");
    println!();
    println!("Send `Accept: application/json` for JSON responses.");
    println!("Press Ctrl+C to stop the gateway");
    println!();
}
