//! Claim review workflow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::claim::{ClaimRecord, ClaimState, ClaimStatus, CrClaim, IfrClaim};
use crate::error::ClaimError;

/// A guard or admin's decision on a pending claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum ReviewDecision {
    Approve,
    Reject { reason: String },
}

impl ReviewDecision {
    /// Creates a rejection with the given reason
    pub fn reject(reason: impl Into<String>) -> Self {
        ReviewDecision::Reject {
            reason: reason.into(),
        }
    }

    /// Builds a decision from review-form fields
    ///
    /// A reason supplied alongside an approval is ignored; a missing reason
    /// on a rejection becomes an empty one and fails review validation.
    pub fn from_form(approve: bool, rejection_reason: Option<String>) -> Self {
        if approve {
            ReviewDecision::Approve
        } else {
            ReviewDecision::Reject {
                reason: rejection_reason.unwrap_or_default(),
            }
        }
    }

    /// Status the claim will hold after this decision
    pub fn target_status(&self) -> ClaimStatus {
        match self {
            ReviewDecision::Approve => ClaimStatus::Approved,
            ReviewDecision::Reject { .. } => ClaimStatus::Rejected,
        }
    }
}

mod sealed {
    use crate::claim::ClaimState;

    pub trait Sealed: Sized {
        fn replace_state(&self, state: ClaimState) -> Self;
    }

    impl Sealed for crate::claim::IfrClaim {
        fn replace_state(&self, state: ClaimState) -> Self {
            self.with_state(state)
        }
    }

    impl Sealed for crate::claim::CrClaim {
        fn replace_state(&self, state: ClaimState) -> Self {
            self.with_state(state)
        }
    }
}

/// Claim types that go through guard/admin review
///
/// Sealed: only [`IfrClaim`] and [`CrClaim`] implement it, and only
/// [`review_claim`] can produce a reviewed value.
pub trait Reviewable: ClaimRecord + sealed::Sealed {}

impl Reviewable for IfrClaim {}
impl Reviewable for CrClaim {}

/// Applies a review decision to a pending claim
///
/// Returns the replacement claim value; the input is left untouched.
///
/// # Arguments
///
/// * `claim` - The claim under review
/// * `decision` - Approve, or reject with a reason
/// * `reviewer` - Display identity of the reviewing guard/admin
/// * `at` - Review timestamp
///
/// # Errors
///
/// * `ClaimError::InvalidTransition` if the claim is already approved or rejected
/// * `ClaimError::Validation` if the reviewer is blank or a rejection reason is blank
///
/// # Example
///
/// ```rust,ignore
/// let approved = review_claim(&claim, &ReviewDecision::Approve, "Forest Guard", Utc::now())?;
/// assert_eq!(approved.status(), ClaimStatus::Approved);
/// ```
pub fn review_claim<C: Reviewable>(
    claim: &C,
    decision: &ReviewDecision,
    reviewer: &str,
    at: DateTime<Utc>,
) -> Result<C, ClaimError> {
    let current = claim.status();
    if current != ClaimStatus::Pending {
        return Err(ClaimError::InvalidTransition {
            from: current,
            to: decision.target_status(),
        });
    }

    if reviewer.trim().is_empty() {
        return Err(ClaimError::validation("reviewed_by", "reviewer identity is required"));
    }

    let state = match decision {
        ReviewDecision::Approve => ClaimState::Approved {
            reviewed_by: reviewer.to_string(),
            reviewed_at: at,
        },
        ReviewDecision::Reject { reason } => {
            if reason.trim().is_empty() {
                return Err(ClaimError::validation(
                    "rejection_reason",
                    "a rejection reason is required",
                ));
            }
            ClaimState::Rejected {
                reviewed_by: reviewer.to_string(),
                reviewed_at: at,
                rejection_reason: reason.clone(),
            }
        }
    };

    Ok(claim.replace_state(state))
}

/// True when `next` is a review outcome of the pending `previous`
///
/// Everything but the state must be unchanged and the version must be one
/// ahead. Storage uses this to refuse replacements that skip the review.
pub fn is_review_of<C: Reviewable + PartialEq>(previous: &C, next: &C) -> bool {
    previous.status() == ClaimStatus::Pending
        && next.status().is_terminal()
        && *next == previous.replace_state(next.state().clone())
}
