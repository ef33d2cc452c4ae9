//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! forest rights portal test suite.
//!
//! # Modules
//!
//! - `fixtures`: Villages, actors and document references from the demo data
//! - `builders`: Builder patterns for submission requests
//! - `assertions`: Custom assertion helpers for claim and record states
//! - `generators`: Property-based test data generators
//! - `latency`: Repository wrappers that simulate slow storage

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;
pub mod latency;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
pub use latency::*;
