//! Portal service
//!
//! Async use cases on top of the engine and the repository ports. Each
//! mutating operation follows the same shape:
//!
//! 1. check the actor's role
//! 2. read the current value from its repository
//! 3. ask the engine for the replacement
//! 4. store it replace-if-unchanged
//! 5. append the activity entry; a failed append is logged, not returned
//!
//! # Example
//!
//! ```rust,ignore
//! let service = PortalService::new(engine, claims, plantations, activity);
//! let claim = service.submit_ifr_claim(&farmer, request).await?;
//! let approved = service
//!     .review_ifr_claim(&guard, claim.id(), &ReviewDecision::Approve)
//!     .await?;
//! ```

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, error, info, instrument, warn};

use core_kernel::{Actor, ClaimId, PitRecordId, UserRole};
use domain_claims::{
    ClaimRecord, CrClaim, CrClaimRequest, IfrClaim, IfrClaimRequest, ReviewDecision,
};
use domain_plantation::{PitRecord, PitRecordRequest, SurvivalYear};

use crate::activity::{verify_chain, ActivityEntry, ActivityEvent};
use crate::analytics::{
    self, ClaimStatusCounts, FarmerProgress, OverviewSummary, PortfolioSnapshot, VillageSummary,
};
use crate::engine::ClaimLifecycleEngine;
use crate::error::EngineError;
use crate::export::{render_village_report, ReportFormat};
use crate::ports::{ActivityLog, ClaimQuery, ClaimRepository, PitRecordQuery, PlantationRepository};

#[derive(Clone)]
pub struct PortalService {
    engine: ClaimLifecycleEngine,
    claims: Arc<dyn ClaimRepository>,
    plantations: Arc<dyn PlantationRepository>,
    activity: Arc<dyn ActivityLog>,
}

impl PortalService {
    pub fn new(
        engine: ClaimLifecycleEngine,
        claims: Arc<dyn ClaimRepository>,
        plantations: Arc<dyn PlantationRepository>,
        activity: Arc<dyn ActivityLog>,
    ) -> Self {
        Self {
            engine,
            claims,
            plantations,
            activity,
        }
    }

    pub fn engine(&self) -> &ClaimLifecycleEngine {
        &self.engine
    }

    // ========================================================================
    // Farmer operations
    // ========================================================================

    /// Files an IFR claim on behalf of the acting farmer
    #[instrument(skip(self, actor, request), fields(actor = %actor.id))]
    pub async fn submit_ifr_claim(
        &self,
        actor: &Actor,
        request: IfrClaimRequest,
    ) -> Result<IfrClaim, EngineError> {
        ensure_submitter(actor, &request.farmer_id, "file claims")?;

        let claim = self.engine.submit_ifr_claim(request)?;
        let claim = self.claims.insert_ifr(claim).await?;
        info!(claim_id = %claim.id(), village = claim.village(), "IFR claim submitted");

        self.record(actor, ActivityEvent::ClaimSubmitted {
            claim_id: claim.id(),
            kind: IfrClaim::KIND,
            village: claim.village().to_string(),
        })
        .await;
        Ok(claim)
    }

    /// Files a CR claim on behalf of the acting farmer
    #[instrument(skip(self, actor, request), fields(actor = %actor.id))]
    pub async fn submit_cr_claim(
        &self,
        actor: &Actor,
        request: CrClaimRequest,
    ) -> Result<CrClaim, EngineError> {
        ensure_submitter(actor, &request.farmer_id, "file claims")?;

        let claim = self.engine.submit_cr_claim(request)?;
        let claim = self.claims.insert_cr(claim).await?;
        info!(claim_id = %claim.id(), village = claim.village(), "CR claim submitted");

        self.record(actor, ActivityEvent::ClaimSubmitted {
            claim_id: claim.id(),
            kind: CrClaim::KIND,
            village: claim.village().to_string(),
        })
        .await;
        Ok(claim)
    }

    /// Registers dug pits and planted saplings for the acting farmer
    #[instrument(skip(self, actor, request), fields(actor = %actor.id))]
    pub async fn submit_pit_record(
        &self,
        actor: &Actor,
        request: PitRecordRequest,
    ) -> Result<PitRecord, EngineError> {
        ensure_submitter(actor, &request.farmer_id, "register pits")?;

        let record = self.engine.submit_pit_record(request)?;
        let record = self.plantations.insert(record).await?;
        info!(
            record_id = %record.id(),
            pits = record.pit_count(),
            incentive = %record.incentive(),
            "Pit record submitted"
        );

        self.record(actor, ActivityEvent::PitRecordSubmitted {
            record_id: record.id(),
            village: record.village().to_string(),
            pit_count: record.pit_count(),
            sapling_count: record.sapling_count(),
        })
        .await;
        Ok(record)
    }

    // ========================================================================
    // Guard / admin operations
    // ========================================================================

    #[instrument(skip(self, actor, decision), fields(actor = %actor.id, claim_id = %id))]
    pub async fn review_ifr_claim(
        &self,
        actor: &Actor,
        id: ClaimId,
        decision: &ReviewDecision,
    ) -> Result<IfrClaim, EngineError> {
        ensure_reviewer(actor, "review claims")?;

        let current = self.claims.get_ifr(id).await?;
        let reviewed = self.engine.review_claim(&current, decision, &actor.name)?;
        let reviewed = self
            .claims
            .replace_ifr(reviewed)
            .await
            .inspect_err(|err| warn!(error = %err, "IFR review not stored"))?;
        info!(status = %reviewed.status(), "IFR claim reviewed");

        self.record(actor, ActivityEvent::ClaimReviewed {
            claim_id: id,
            kind: IfrClaim::KIND,
            status: reviewed.status(),
        })
        .await;
        Ok(reviewed)
    }

    #[instrument(skip(self, actor, decision), fields(actor = %actor.id, claim_id = %id))]
    pub async fn review_cr_claim(
        &self,
        actor: &Actor,
        id: ClaimId,
        decision: &ReviewDecision,
    ) -> Result<CrClaim, EngineError> {
        ensure_reviewer(actor, "review claims")?;

        let current = self.claims.get_cr(id).await?;
        let reviewed = self.engine.review_claim(&current, decision, &actor.name)?;
        let reviewed = self
            .claims
            .replace_cr(reviewed)
            .await
            .inspect_err(|err| warn!(error = %err, "CR review not stored"))?;
        info!(status = %reviewed.status(), "CR claim reviewed");

        self.record(actor, ActivityEvent::ClaimReviewed {
            claim_id: id,
            kind: CrClaim::KIND,
            status: reviewed.status(),
        })
        .await;
        Ok(reviewed)
    }

    /// Records a field survival check on a pit record
    #[instrument(skip(self, actor, photos), fields(actor = %actor.id, record_id = %id))]
    pub async fn record_survival_check(
        &self,
        actor: &Actor,
        id: PitRecordId,
        year: SurvivalYear,
        survival_rate: Decimal,
        photos: Vec<String>,
    ) -> Result<PitRecord, EngineError> {
        ensure_reviewer(actor, "record survival checks")?;

        let current = self.plantations.get(id).await?;
        let updated = self
            .engine
            .record_survival_check(&current, year, survival_rate, photos)?;
        let updated = self
            .plantations
            .replace(updated)
            .await
            .inspect_err(|err| warn!(error = %err, "Survival check not stored"))?;
        info!(
            %survival_rate,
            incentive = %updated.incentive(),
            status = %updated.status(),
            "Survival check recorded"
        );

        self.record(actor, ActivityEvent::SurvivalRecorded {
            record_id: id,
            year,
            survival_rate,
            incentive: updated.incentive(),
        })
        .await;
        Ok(updated)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub async fn ifr_claims(&self, query: ClaimQuery) -> Result<Vec<IfrClaim>, EngineError> {
        debug!(?query, "Listing IFR claims");
        Ok(self.claims.find_ifr(query).await?)
    }

    pub async fn cr_claims(&self, query: ClaimQuery) -> Result<Vec<CrClaim>, EngineError> {
        debug!(?query, "Listing CR claims");
        Ok(self.claims.find_cr(query).await?)
    }

    pub async fn pit_records(&self, query: PitRecordQuery) -> Result<Vec<PitRecord>, EngineError> {
        debug!(?query, "Listing pit records");
        Ok(self.plantations.find(query).await?)
    }

    /// Everything currently stored, for the dashboards
    pub async fn snapshot(&self) -> Result<PortfolioSnapshot, EngineError> {
        let (ifr, cr, records) = tokio::try_join!(
            self.claims.find_ifr(ClaimQuery::default()),
            self.claims.find_cr(ClaimQuery::default()),
            self.plantations.find(PitRecordQuery::default()),
        )?;
        Ok(PortfolioSnapshot::new(ifr, cr, records))
    }

    pub async fn village_summary(&self) -> Result<Vec<VillageSummary>, EngineError> {
        let snapshot = self.snapshot().await?;
        Ok(self.engine.village_summary(&snapshot))
    }

    pub async fn overview(&self) -> Result<OverviewSummary, EngineError> {
        let snapshot = self.snapshot().await?;
        Ok(self.engine.overview_summary(&snapshot))
    }

    pub async fn claim_status_counts(&self) -> Result<ClaimStatusCounts, EngineError> {
        let snapshot = self.snapshot().await?;
        Ok(analytics::claim_status_counts(&snapshot))
    }

    pub async fn farmer_progress(&self, farmer_id: &str) -> Result<FarmerProgress, EngineError> {
        let records = self.plantations.find(PitRecordQuery::by_farmer(farmer_id)).await?;
        Ok(analytics::farmer_progress(
            &records,
            farmer_id,
            self.engine.policy().currency(),
        ))
    }

    pub async fn recent_activity(&self, limit: usize) -> Result<Vec<ActivityEntry>, EngineError> {
        Ok(self.activity.recent(limit).await?)
    }

    /// Re-hashes the activity chain; `false` if any entry was altered
    pub async fn verify_activity(&self) -> Result<bool, EngineError> {
        let entries = self.activity.entries().await?;
        match verify_chain(&entries) {
            Ok(()) => Ok(true),
            Err(at) => {
                warn!(?at, entries = entries.len(), "Activity chain broken");
                Ok(false)
            }
        }
    }

    /// Village table as CSV or JSON; admins only
    #[instrument(skip(self, actor), fields(actor = %actor.id))]
    pub async fn export_village_report(
        &self,
        actor: &Actor,
        format: ReportFormat,
    ) -> Result<String, EngineError> {
        if actor.role != UserRole::Admin {
            warn!(role = %actor.role, "Export refused");
            return Err(EngineError::forbidden(actor.role, "export reports"));
        }
        let rows = self.village_summary().await?;
        Ok(render_village_report(&rows, format)?)
    }

    /// Appends to the activity log after the entity is stored
    ///
    /// A failed append is logged and not returned, since the operation has
    /// already taken effect.
    async fn record(&self, actor: &Actor, event: ActivityEvent) {
        let event_type = event.event_type();
        match self.activity.append(actor, event).await {
            Ok(entry) => debug!(hash = %entry.hash, event = event_type, "Activity recorded"),
            Err(err) => error!(error = %err, event = event_type, "Activity entry not recorded"),
        }
    }
}

fn ensure_submitter(actor: &Actor, farmer_id: &str, action: &str) -> Result<(), EngineError> {
    if !actor.role.can_submit() {
        warn!(role = %actor.role, action, "Submission refused");
        return Err(EngineError::forbidden(actor.role, action));
    }
    if actor.id != farmer_id {
        warn!(farmer_id, "Submission for another farmer refused");
        return Err(EngineError::forbidden(
            actor.role,
            format!("{} for another farmer", action),
        ));
    }
    Ok(())
}

fn ensure_reviewer(actor: &Actor, action: &str) -> Result<(), EngineError> {
    if !actor.role.can_review() {
        warn!(role = %actor.role, action, "Review refused");
        return Err(EngineError::forbidden(actor.role, action));
    }
    Ok(())
}
