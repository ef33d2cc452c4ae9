//! Command line for `forest-portal`
//!
//! Flags override the matching `PORTAL_*` settings from [`PortalConfig`].

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use forest_engine::ReportFormat;

use crate::config::PortalConfig;

/// Forest-rights claim and plantation portal
#[derive(Parser, Debug, Clone)]
#[command(name = "forest-portal")]
#[command(about = "Forest-rights claims and plantation dashboards over demo data")]
pub struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PORTAL_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Incentive per pit at full survival
    #[arg(long, env = "PORTAL_BASE_RATE_PER_PIT", global = true)]
    pub base_rate: Option<Decimal>,

    /// Start from an empty portal instead of the demo data
    #[arg(long, global = true)]
    pub empty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print overview, village table and recent activity
    Demo,
    /// District overview as JSON
    Overview,
    /// Per-village summary as JSON
    Villages,
    /// Recent activity, newest first, with a chain check
    Activity {
        /// Entries to show; defaults to PORTAL_ACTIVITY_FEED_LIMIT
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Village report for download
    Export {
        /// csv or json
        #[arg(long, default_value = "csv")]
        format: ReportFormat,
    },
}

impl Args {
    /// Applies command-line overrides on top of the loaded configuration
    pub fn apply(&self, mut config: PortalConfig) -> PortalConfig {
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(rate) = self.base_rate {
            config.base_rate_per_pit = rate;
        }
        if self.empty {
            config.seed_demo_data = false;
        }
        config
    }
}
