//! Forest-rights portal binary
//!
//! # Usage
//!
//! ```bash
//! # Overview of the demo district
//! cargo run --bin forest-portal -- overview
//!
//! # Village report as CSV, with a custom rate per pit
//! PORTAL_BASE_RATE_PER_PIT=25 cargo run --bin forest-portal -- export --format csv
//! ```
//!
//! # Environment Variables
//!
//! * `PORTAL_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `PORTAL_CURRENCY` - Incentive currency code (default: INR)
//! * `PORTAL_BASE_RATE_PER_PIT` - Incentive per pit at full survival (default: 20)
//! * `PORTAL_SEED_DEMO_DATA` - Load demo data on start (default: true)
//! * `PORTAL_ACTIVITY_FEED_LIMIT` - Entries shown by `activity` (default: 10)

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use portal_cli::{run, Args, PortalConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = args.apply(PortalConfig::from_env().context("invalid PORTAL_* configuration")?);

    init_tracing(&config.log_level);

    tracing::info!(
        currency = %config.currency,
        base_rate_per_pit = %config.base_rate_per_pit,
        seed_demo_data = config.seed_demo_data,
        "Starting forest-rights portal"
    );

    let output = run(&args.command, &config).await?;
    println!("{}", output);
    Ok(())
}

/// Initializes the tracing subscriber; `RUST_LOG` wins over the configured level
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}
