//! Forest-rights portal command line
//!
//! Wires configuration, the in-memory store and the portal service together
//! and renders dashboards for the terminal.
//!
//! # Example
//!
//! ```rust,ignore
//! use portal_cli::{run, Command, PortalConfig};
//!
//! let output = run(&Command::Overview, &PortalConfig::default()).await?;
//! println!("{output}");
//! ```

pub mod cli;
pub mod config;
pub mod seed;

pub use cli::{Args, Command};
pub use config::PortalConfig;
pub use seed::{seed_demo, DemoCast};

use anyhow::Context;
use serde_json::json;
use tracing::info;

use forest_engine::{ClaimLifecycleEngine, PortalService};
use infra_memory::MemoryStore;

/// Builds a portal over a fresh in-memory store, seeded when configured
pub async fn build_portal(config: &PortalConfig) -> anyhow::Result<PortalService> {
    let policy = config
        .incentive_policy()
        .context("invalid incentive configuration")?;
    let service = MemoryStore::new().portal_service(ClaimLifecycleEngine::new(policy));

    if config.seed_demo_data {
        seed_demo(&service, &DemoCast::default())
            .await
            .context("failed to load demo data")?;
    }
    Ok(service)
}

/// Runs one command and returns what should be printed
pub async fn run(command: &Command, config: &PortalConfig) -> anyhow::Result<String> {
    let service = build_portal(config).await?;
    info!(?command, "Running command");

    let output = match command {
        Command::Demo => {
            let overview = service.overview().await?;
            let villages = service.village_summary().await?;
            let activity = service.recent_activity(config.activity_feed_limit).await?;
            serde_json::to_string_pretty(&json!({
                "overview": overview,
                "villages": villages,
                "recent_activity": activity,
            }))?
        }
        Command::Overview => serde_json::to_string_pretty(&service.overview().await?)?,
        Command::Villages => serde_json::to_string_pretty(&service.village_summary().await?)?,
        Command::Activity { limit } => {
            let limit = limit.unwrap_or(config.activity_feed_limit);
            let entries = service.recent_activity(limit).await?;
            let feed: Vec<_> = entries
                .iter()
                .map(|entry| {
                    json!({
                        "timestamp": entry.timestamp,
                        "type": entry.event.event_type(),
                        "actor": entry.actor_name,
                        "description": entry.event.describe(),
                        "hash": entry.hash,
                    })
                })
                .collect();
            serde_json::to_string_pretty(&json!({
                "chain_intact": service.verify_activity().await?,
                "entries": feed,
            }))?
        }
        Command::Export { format } => {
            service
                .export_village_report(&DemoCast::default().admin, *format)
                .await?
        }
    };
    Ok(output)
}
