//! Forest Rights Claims Domain
//!
//! This crate implements the lifecycle of Individual Forest Rights (IFR) and
//! Community Forest Rights (CR) claims, from farmer submission through a
//! single guard/admin review.
//!
//! # Claim Lifecycle
//!
//! ```text
//!            ┌──> Approved
//! Pending ───┤
//!            └──> Rejected (reason required)
//! ```
//!
//! Both outcomes are terminal. [`review::review_claim`] is the only code path
//! that moves a claim out of `Pending`.

pub mod claim;
pub mod submission;
pub mod review;
pub mod error;

pub use claim::{ClaimKind, ClaimRecord, ClaimState, ClaimStatus, CrClaim, IfrClaim};
pub use submission::{CrClaimRequest, IfrClaimRequest, submit_cr_claim, submit_ifr_claim};
pub use review::{ReviewDecision, Reviewable, is_review_of, review_claim};
pub use error::ClaimError;
