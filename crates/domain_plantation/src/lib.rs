//! Plantation Tracking Domain
//!
//! A pit record tracks afforestation work on a farmer's plot: pits dug,
//! saplings planted, and two yearly survival checks. Each check recomputes
//! the incentive payable to the farmer.
//!
//! # Record Lifecycle
//!
//! ```text
//! Active (no survival data) -> Active (year 1 checked) -> Completed (year 2 checked)
//! ```

pub mod pit_record;
pub mod survival;
pub mod incentive;
pub mod error;

pub use pit_record::{PitRecord, PitRecordRequest, PlantationStatus, submit_pit_record};
pub use survival::{PlantationStage, SurvivalCheck, SurvivalYear, is_survival_check_of, record_survival_check};
pub use incentive::{IncentivePolicy, MAX_RATE_PER_PIT};
pub use error::PlantationError;
