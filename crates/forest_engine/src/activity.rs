//! Activity ledger
//!
//! Every successful portal operation leaves an [`ActivityEntry`]. Entries are
//! hash-chained: each hash covers the previous entry's hash and the canonical
//! JSON of the entry body, so rewriting any past entry breaks every hash
//! after it.
//!
//! ```text
//! GENESIS ─▶ sha256(GENESIS ‖ body₁) ─▶ sha256(hash₁ ‖ body₂) ─▶ ...
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use core_kernel::{ActivityId, Actor, ClaimId, Money, PitRecordId, UserRole};
use domain_claims::{ClaimKind, ClaimStatus};
use domain_plantation::SurvivalYear;

/// Previous-hash value for the first entry of a chain
pub const GENESIS_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// What happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityEvent {
    ClaimSubmitted {
        claim_id: ClaimId,
        kind: ClaimKind,
        village: String,
    },
    ClaimReviewed {
        claim_id: ClaimId,
        kind: ClaimKind,
        status: ClaimStatus,
    },
    PitRecordSubmitted {
        record_id: PitRecordId,
        village: String,
        pit_count: u32,
        sapling_count: u32,
    },
    SurvivalRecorded {
        record_id: PitRecordId,
        year: SurvivalYear,
        survival_rate: Decimal,
        incentive: Money,
    },
}

impl ActivityEvent {
    /// Short label for activity feeds
    pub fn event_type(&self) -> &'static str {
        match self {
            ActivityEvent::ClaimSubmitted { kind: ClaimKind::Ifr, .. } => "IFR Claim",
            ActivityEvent::ClaimSubmitted { kind: ClaimKind::Cr, .. } => "CR Claim",
            ActivityEvent::ClaimReviewed { status: ClaimStatus::Rejected, .. } => "Claim Rejected",
            ActivityEvent::ClaimReviewed { .. } => "Claim Approved",
            ActivityEvent::PitRecordSubmitted { .. } => "Pit Registration",
            ActivityEvent::SurvivalRecorded { .. } => "Survival Check",
        }
    }

    /// One-line human readable description
    pub fn describe(&self) -> String {
        match self {
            ActivityEvent::ClaimSubmitted { claim_id, kind, village } => {
                format!("{} claim {} filed in {}", kind, claim_id, village)
            }
            ActivityEvent::ClaimReviewed { claim_id, kind, status } => {
                format!("{} claim {} {}", kind, claim_id, status)
            }
            ActivityEvent::PitRecordSubmitted { record_id, village, pit_count, sapling_count } => {
                format!(
                    "{} pits / {} saplings registered as {} in {}",
                    pit_count, sapling_count, record_id, village
                )
            }
            ActivityEvent::SurvivalRecorded { record_id, year, survival_rate, incentive } => {
                format!(
                    "{} survival {}% on {}, incentive now {}",
                    year, survival_rate, record_id, incentive
                )
            }
        }
    }
}

/// One link of the activity chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: ActivityId,
    pub timestamp: DateTime<Utc>,
    pub actor_id: String,
    pub actor_name: String,
    pub actor_role: UserRole,
    pub event: ActivityEvent,
    pub prev_hash: String,
    pub hash: String,
}

#[derive(Serialize)]
struct EntryBody<'a> {
    id: &'a ActivityId,
    timestamp: &'a DateTime<Utc>,
    actor_id: &'a str,
    actor_name: &'a str,
    actor_role: &'a UserRole,
    event: &'a ActivityEvent,
}

impl ActivityEntry {
    /// Builds the entry that follows `prev_hash`
    pub fn chained(
        prev_hash: &str,
        actor: &Actor,
        event: ActivityEvent,
        at: DateTime<Utc>,
    ) -> Result<Self, serde_json::Error> {
        let mut entry = Self {
            id: ActivityId::new_v7(),
            timestamp: at,
            actor_id: actor.id.clone(),
            actor_name: actor.name.clone(),
            actor_role: actor.role,
            event,
            prev_hash: prev_hash.to_string(),
            hash: String::new(),
        };
        entry.hash = entry.compute_hash()?;
        Ok(entry)
    }

    /// Recomputes the hash from the stored fields
    pub fn compute_hash(&self) -> Result<String, serde_json::Error> {
        let body = serde_json::to_vec(&EntryBody {
            id: &self.id,
            timestamp: &self.timestamp,
            actor_id: &self.actor_id,
            actor_name: &self.actor_name,
            actor_role: &self.actor_role,
            event: &self.event,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(self.prev_hash.as_bytes());
        hasher.update(&body);
        Ok(hex::encode(hasher.finalize()))
    }
}

/// Where a chain stops verifying
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainBreak {
    /// Entry's `prev_hash` is not the previous entry's hash
    Link { index: usize },
    /// Entry's stored hash does not match its contents
    Hash { index: usize },
}

/// Checks a chain given oldest first
pub fn verify_chain(entries: &[ActivityEntry]) -> Result<(), ChainBreak> {
    let mut expected_prev = GENESIS_HASH;
    for (index, entry) in entries.iter().enumerate() {
        if entry.prev_hash != expected_prev {
            return Err(ChainBreak::Link { index });
        }
        match entry.compute_hash() {
            Ok(hash) if hash == entry.hash => {}
            _ => return Err(ChainBreak::Hash { index }),
        }
        expected_prev = &entry.hash;
    }
    Ok(())
}
