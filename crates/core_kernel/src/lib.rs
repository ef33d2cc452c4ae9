//! Core Kernel - Foundational types shared by the forest rights portal
//!
//! This crate provides the building blocks used across all domain crates:
//! - Exact decimal money for incentive payouts
//! - Strongly-typed identifiers for claims, plantation records and log entries
//! - WGS84 coordinates with range validation
//! - The authenticated actor (role + name) passed into every operation
//! - Port infrastructure for swappable storage adapters

pub mod money;
pub mod identifiers;
pub mod geo;
pub mod identity;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use identifiers::{ActivityId, ClaimId, IdParseError, PitRecordId};
pub use geo::{GeoPoint, GeoError};
pub use identity::{Actor, UserRole};
pub use ports::{PortError, DomainPort};
