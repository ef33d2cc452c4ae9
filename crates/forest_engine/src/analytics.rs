//! Portfolio analytics
//!
//! Pure aggregations over a snapshot of claims and pit records. Results do
//! not depend on input order: groupings go through `BTreeMap`/`BTreeSet` and
//! survival means are exact decimal sums divided once.
//!
//! Survival rates are the latest check of each record (year 2 if present,
//! else year 1); records without any check are left out of the mean. When
//! nothing has been checked the rate is `None`.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money};
use domain_claims::{ClaimRecord, ClaimStatus, CrClaim, IfrClaim};
use domain_plantation::{PitRecord, PlantationStatus};

/// Decimal places kept on reported survival percentages
const RATE_DP: u32 = 2;

/// Everything the dashboards aggregate over
#[derive(Debug, Clone, Default)]
pub struct PortfolioSnapshot {
    pub ifr_claims: Vec<IfrClaim>,
    pub cr_claims: Vec<CrClaim>,
    pub pit_records: Vec<PitRecord>,
}

impl PortfolioSnapshot {
    pub fn new(ifr_claims: Vec<IfrClaim>, cr_claims: Vec<CrClaim>, pit_records: Vec<PitRecord>) -> Self {
        Self {
            ifr_claims,
            cr_claims,
            pit_records,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ifr_claims.is_empty() && self.cr_claims.is_empty() && self.pit_records.is_empty()
    }

    fn claim_refs(&self) -> impl Iterator<Item = (&str, &str, ClaimStatus)> {
        self.ifr_claims
            .iter()
            .map(|c| (c.village(), c.farmer_id(), c.status()))
            .chain(
                self.cr_claims
                    .iter()
                    .map(|c| (c.village(), c.farmer_id(), c.status())),
            )
    }
}

/// Pending / approved / rejected tallies across both claim kinds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimStatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl ClaimStatusCounts {
    fn add(&mut self, status: ClaimStatus) {
        match status {
            ClaimStatus::Pending => self.pending += 1,
            ClaimStatus::Approved => self.approved += 1,
            ClaimStatus::Rejected => self.rejected += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.pending + self.approved + self.rejected
    }

    /// Approved share of all claims as a whole percentage
    pub fn approval_rate(&self) -> Option<Decimal> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let rate = Decimal::from(self.approved as u64) * Decimal::from(100u64) / Decimal::from(total as u64);
        Some(rate.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
    }
}

/// One row of the village performance table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VillageSummary {
    pub village: String,
    /// Distinct farmers with any claim or pit record in the village
    pub farmers: usize,
    pub claims: usize,
    pub pits: u64,
    pub saplings: u64,
    pub survival_rate: Option<Decimal>,
}

/// District-wide dashboard totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewSummary {
    pub villages: usize,
    pub farmers: usize,
    pub ifr_claims: usize,
    pub cr_claims: usize,
    pub claim_status: ClaimStatusCounts,
    pub pit_records: usize,
    pub completed_records: usize,
    pub pits: u64,
    pub saplings: u64,
    pub survival_rate: Option<Decimal>,
    /// Sum over completed records only
    pub incentives_paid: Money,
    /// Current incentive of every record, completed or not
    pub incentives_accrued: Money,
    /// Paid incentives divided by farmers, rounded to a whole unit
    pub average_incentive_per_farmer: Option<Money>,
}

/// A single farmer's plantation totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmerProgress {
    pub farmer_id: String,
    pub records: usize,
    pub completed_records: usize,
    pub pits: u64,
    pub saplings: u64,
    pub survival_rate: Option<Decimal>,
    pub incentive: Money,
}

#[derive(Default)]
struct RateMean {
    sum: Decimal,
    count: u64,
}

impl RateMean {
    fn push(&mut self, rate: Option<Decimal>) {
        if let Some(rate) = rate {
            self.sum += rate;
            self.count += 1;
        }
    }

    fn mean(&self) -> Option<Decimal> {
        if self.count == 0 {
            return None;
        }
        Some(
            (self.sum / Decimal::from(self.count))
                .round_dp_with_strategy(RATE_DP, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

/// Saturates at `Decimal::MAX` rather than overflowing
fn sum_incentives<'a>(records: impl Iterator<Item = &'a PitRecord>, currency: Currency) -> Money {
    let amount = records
        .filter(|r| r.incentive().currency() == currency)
        .fold(Decimal::ZERO, |total, r| total.saturating_add(r.incentive().amount()));
    Money::new(amount, currency)
}

/// Per-village farmers, claims, pits, saplings and mean survival, sorted by village
pub fn village_summary(snapshot: &PortfolioSnapshot) -> Vec<VillageSummary> {
    #[derive(Default)]
    struct Acc<'a> {
        farmers: BTreeSet<&'a str>,
        claims: usize,
        pits: u64,
        saplings: u64,
        survival: RateMean,
    }

    let mut villages: BTreeMap<&str, Acc> = BTreeMap::new();

    for (village, farmer_id, _) in snapshot.claim_refs() {
        let acc = villages.entry(village).or_default();
        acc.farmers.insert(farmer_id);
        acc.claims += 1;
    }

    for record in &snapshot.pit_records {
        let acc = villages.entry(record.village()).or_default();
        acc.farmers.insert(record.farmer_id());
        acc.pits += u64::from(record.pit_count());
        acc.saplings += u64::from(record.sapling_count());
        acc.survival.push(record.latest_survival_rate());
    }

    villages
        .into_iter()
        .map(|(village, acc)| VillageSummary {
            village: village.to_string(),
            farmers: acc.farmers.len(),
            claims: acc.claims,
            pits: acc.pits,
            saplings: acc.saplings,
            survival_rate: acc.survival.mean(),
        })
        .collect()
}

/// District totals; amounts in other currencies than `currency` are ignored
pub fn overview_summary(snapshot: &PortfolioSnapshot, currency: Currency) -> OverviewSummary {
    let mut villages = BTreeSet::new();
    let mut farmers = BTreeSet::new();
    let mut claim_status = ClaimStatusCounts::default();

    for (village, farmer_id, status) in snapshot.claim_refs() {
        villages.insert(village);
        farmers.insert(farmer_id);
        claim_status.add(status);
    }

    let mut survival = RateMean::default();
    let mut pits = 0u64;
    let mut saplings = 0u64;
    for record in &snapshot.pit_records {
        villages.insert(record.village());
        farmers.insert(record.farmer_id());
        pits += u64::from(record.pit_count());
        saplings += u64::from(record.sapling_count());
        survival.push(record.latest_survival_rate());
    }

    let completed: Vec<&PitRecord> = snapshot
        .pit_records
        .iter()
        .filter(|r| r.status() == PlantationStatus::Completed)
        .collect();
    let incentives_paid = sum_incentives(completed.iter().copied(), currency);
    let incentives_accrued = sum_incentives(snapshot.pit_records.iter(), currency);
    let average_incentive_per_farmer = incentives_paid
        .per(farmers.len() as u64)
        .map(|avg| avg.round_whole());

    OverviewSummary {
        villages: villages.len(),
        farmers: farmers.len(),
        ifr_claims: snapshot.ifr_claims.len(),
        cr_claims: snapshot.cr_claims.len(),
        claim_status,
        pit_records: snapshot.pit_records.len(),
        completed_records: completed.len(),
        pits,
        saplings,
        survival_rate: survival.mean(),
        incentives_paid,
        incentives_accrued,
        average_incentive_per_farmer,
    }
}

/// Plantation totals for one farmer
pub fn farmer_progress(records: &[PitRecord], farmer_id: &str, currency: Currency) -> FarmerProgress {
    let mine: Vec<&PitRecord> = records.iter().filter(|r| r.farmer_id() == farmer_id).collect();

    let mut survival = RateMean::default();
    for record in &mine {
        survival.push(record.latest_survival_rate());
    }

    FarmerProgress {
        farmer_id: farmer_id.to_string(),
        records: mine.len(),
        completed_records: mine
            .iter()
            .filter(|r| r.status() == PlantationStatus::Completed)
            .count(),
        pits: mine.iter().map(|r| u64::from(r.pit_count())).sum(),
        saplings: mine.iter().map(|r| u64::from(r.sapling_count())).sum(),
        survival_rate: survival.mean(),
        incentive: sum_incentives(mine.iter().copied(), currency),
    }
}

/// Tallies pending / approved / rejected over both claim kinds
pub fn claim_status_counts(snapshot: &PortfolioSnapshot) -> ClaimStatusCounts {
    let mut counts = ClaimStatusCounts::default();
    for (_, _, status) in snapshot.claim_refs() {
        counts.add(status);
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rate_mean_rounds_to_two_places() {
        let mut mean = RateMean::default();
        for rate in [dec!(90), dec!(95), dec!(92)] {
            mean.push(Some(rate));
        }
        mean.push(None);
        assert_eq!(mean.mean(), Some(dec!(92.33)));
        assert_eq!(RateMean::default().mean(), None);
    }

    #[test]
    fn test_approval_rate() {
        let counts = ClaimStatusCounts { pending: 1, approved: 2, rejected: 0 };
        assert_eq!(counts.approval_rate(), Some(dec!(67)));
        assert_eq!(ClaimStatusCounts::default().approval_rate(), None);
    }
}
