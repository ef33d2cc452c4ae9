//! Claim lifecycle engine
//!
//! A thin synchronous facade over the claim and plantation domains. Every
//! operation takes its input by reference or value and returns a fresh
//! replacement; nothing here touches storage. The engine supplies the clock
//! and the incentive policy for new records, so callers never set
//! timestamps or amounts.

use chrono::Utc;
use rust_decimal::Decimal;

use domain_claims::{
    ClaimError, CrClaim, CrClaimRequest, IfrClaim, IfrClaimRequest, ReviewDecision, Reviewable,
};
use domain_plantation::{IncentivePolicy, PitRecord, PitRecordRequest, PlantationError, SurvivalYear};

use crate::analytics::{self, OverviewSummary, PortfolioSnapshot, VillageSummary};

#[derive(Debug, Clone, Default)]
pub struct ClaimLifecycleEngine {
    policy: IncentivePolicy,
}

impl ClaimLifecycleEngine {
    pub fn new(policy: IncentivePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &IncentivePolicy {
        &self.policy
    }

    /// Files a new IFR claim in `pending`
    pub fn submit_ifr_claim(&self, request: IfrClaimRequest) -> Result<IfrClaim, ClaimError> {
        domain_claims::submit_ifr_claim(request, Utc::now())
    }

    /// Files a new CR claim in `pending`
    pub fn submit_cr_claim(&self, request: CrClaimRequest) -> Result<CrClaim, ClaimError> {
        domain_claims::submit_cr_claim(request, Utc::now())
    }

    /// Approves or rejects a pending claim, stamping `reviewer` and now
    pub fn review_claim<C: Reviewable>(
        &self,
        claim: &C,
        decision: &ReviewDecision,
        reviewer: &str,
    ) -> Result<C, ClaimError> {
        domain_claims::review_claim(claim, decision, reviewer, Utc::now())
    }

    /// Registers a new pit record at the flat per-pit incentive
    pub fn submit_pit_record(&self, request: PitRecordRequest) -> Result<PitRecord, PlantationError> {
        domain_plantation::submit_pit_record(request, &self.policy, Utc::now())
    }

    /// Records the next yearly survival check and recomputes the incentive
    /// under the policy the record was registered with
    pub fn record_survival_check(
        &self,
        record: &PitRecord,
        year: SurvivalYear,
        survival_rate: Decimal,
        photos: Vec<String>,
    ) -> Result<PitRecord, PlantationError> {
        domain_plantation::record_survival_check(record, year, survival_rate, photos, Utc::now())
    }

    pub fn village_summary(&self, snapshot: &PortfolioSnapshot) -> Vec<VillageSummary> {
        analytics::village_summary(snapshot)
    }

    /// Portfolio totals in the engine's incentive currency
    pub fn overview_summary(&self, snapshot: &PortfolioSnapshot) -> OverviewSummary {
        analytics::overview_summary(snapshot, self.policy.currency())
    }
}
