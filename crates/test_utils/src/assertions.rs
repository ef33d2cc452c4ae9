//! Custom Test Assertions
//!
//! Assertion helpers for claim and plantation states that give more
//! meaningful failure messages than field-by-field `assert_eq!`.

use rust_decimal::Decimal;

use core_kernel::Money;
use domain_claims::{ClaimRecord, ClaimStatus};
use domain_plantation::{PitRecord, PlantationStatus};

/// Asserts a claim is pending with no review fields
pub fn assert_claim_pending<C: ClaimRecord>(claim: &C) {
    let state = claim.state();
    assert_eq!(claim.status(), ClaimStatus::Pending, "Expected pending claim, got {:?}", state);
    assert!(state.reviewed_by().is_none(), "Pending claim has reviewer: {:?}", state);
    assert!(state.reviewed_at().is_none(), "Pending claim has review time: {:?}", state);
    assert!(state.rejection_reason().is_none(), "Pending claim has rejection reason: {:?}", state);
}

/// Asserts a claim was approved by `reviewer`
pub fn assert_claim_approved<C: ClaimRecord>(claim: &C, reviewer: &str) {
    let state = claim.state();
    assert_eq!(claim.status(), ClaimStatus::Approved, "Expected approved claim, got {:?}", state);
    assert_eq!(state.reviewed_by(), Some(reviewer), "Reviewer mismatch");
    assert!(state.reviewed_at().is_some(), "Approved claim missing review time");
    assert!(state.rejection_reason().is_none(), "Approved claim carries a rejection reason");
}

/// Asserts a claim was rejected by `reviewer` with exactly `reason`
pub fn assert_claim_rejected<C: ClaimRecord>(claim: &C, reviewer: &str, reason: &str) {
    let state = claim.state();
    assert_eq!(claim.status(), ClaimStatus::Rejected, "Expected rejected claim, got {:?}", state);
    assert_eq!(state.reviewed_by(), Some(reviewer), "Reviewer mismatch");
    assert!(state.reviewed_at().is_some(), "Rejected claim missing review time");
    assert_eq!(state.rejection_reason(), Some(reason), "Rejection reason mismatch");
}

/// Asserts the record's incentive in whole currency units
pub fn assert_incentive(record: &PitRecord, expected: Money) {
    assert_eq!(
        record.incentive(),
        expected,
        "Incentive mismatch on {} ({} pits, survival {:?})",
        record.id(),
        record.pit_count(),
        record.latest_survival_rate()
    );
}

/// Asserts a record is active and carries the given latest survival rate
pub fn assert_record_active(record: &PitRecord, latest_rate: Option<Decimal>) {
    assert_eq!(record.status(), PlantationStatus::Active, "Expected active record {}", record.id());
    assert_eq!(record.latest_survival_rate(), latest_rate, "Latest survival rate mismatch");
}
