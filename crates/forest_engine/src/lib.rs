//! Forest Rights Portal Engine
//!
//! Ties the claim and plantation domains together:
//!
//! - [`ClaimLifecycleEngine`]: synchronous, pure transitions with the clock
//!   and incentive policy supplied
//! - repository ports ([`ClaimRepository`], [`PlantationRepository`],
//!   [`ActivityLog`]) with replace-if-unchanged semantics
//! - [`PortalService`]: async use cases with role checks and activity logging
//! - dashboard analytics, the hash-chained activity ledger and report export

pub mod engine;
pub mod ports;
pub mod service;
pub mod analytics;
pub mod activity;
pub mod export;
pub mod error;

pub use engine::ClaimLifecycleEngine;
pub use ports::{ActivityLog, ClaimQuery, ClaimRepository, PitRecordQuery, PlantationRepository};
pub use service::PortalService;
pub use analytics::{
    claim_status_counts, farmer_progress, overview_summary, village_summary, ClaimStatusCounts,
    FarmerProgress, OverviewSummary, PortfolioSnapshot, VillageSummary,
};
pub use activity::{verify_chain, ActivityEntry, ActivityEvent, ChainBreak, GENESIS_HASH};
pub use export::{render_village_report, ReportFormat, CSV_HEADER};
pub use error::EngineError;
