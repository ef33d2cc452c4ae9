//! Repository ports
//!
//! The engine produces replacement values; these traits describe the
//! collection holders that store them. Every `replace_*` is
//! replace-if-unchanged: the adapter accepts the new value only when it is
//! exactly one version ahead of what is stored, and otherwise fails with
//! `PortError::StaleVersion`. Two reviewers racing on the same claim therefore
//! cannot both succeed.

use async_trait::async_trait;

use core_kernel::{Actor, ClaimId, DomainPort, PitRecordId, PortError};
use domain_claims::{ClaimRecord, ClaimStatus, CrClaim, IfrClaim};
use domain_plantation::{PitRecord, PlantationStatus};

use crate::activity::{ActivityEntry, ActivityEvent};

/// Query parameters for finding claims
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimQuery {
    pub village: Option<String>,
    pub farmer_id: Option<String>,
    pub status: Option<ClaimStatus>,
}

impl ClaimQuery {
    pub fn by_village(village: impl Into<String>) -> Self {
        Self {
            village: Some(village.into()),
            ..Default::default()
        }
    }

    pub fn by_farmer(farmer_id: impl Into<String>) -> Self {
        Self {
            farmer_id: Some(farmer_id.into()),
            ..Default::default()
        }
    }

    pub fn by_status(status: ClaimStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Whether a claim satisfies every filter that is set
    pub fn matches<C: ClaimRecord>(&self, claim: &C) -> bool {
        self.village.as_deref().map_or(true, |v| claim.village() == v)
            && self.farmer_id.as_deref().map_or(true, |f| claim.farmer_id() == f)
            && self.status.map_or(true, |s| claim.status() == s)
    }
}

/// Query parameters for finding pit records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PitRecordQuery {
    pub village: Option<String>,
    pub farmer_id: Option<String>,
    pub status: Option<PlantationStatus>,
}

impl PitRecordQuery {
    pub fn by_village(village: impl Into<String>) -> Self {
        Self {
            village: Some(village.into()),
            ..Default::default()
        }
    }

    pub fn by_farmer(farmer_id: impl Into<String>) -> Self {
        Self {
            farmer_id: Some(farmer_id.into()),
            ..Default::default()
        }
    }

    pub fn matches(&self, record: &PitRecord) -> bool {
        self.village.as_deref().map_or(true, |v| record.village() == v)
            && self.farmer_id.as_deref().map_or(true, |f| record.farmer_id() == f)
            && self.status.map_or(true, |s| record.status() == s)
    }
}

/// Storage for IFR and CR claims
///
/// `find_*` results are ordered by submission time, oldest first.
#[async_trait]
pub trait ClaimRepository: DomainPort {
    /// Stores a new claim; `PortError::AlreadyExists` if the id is taken
    async fn insert_ifr(&self, claim: IfrClaim) -> Result<IfrClaim, PortError>;

    /// Replace-if-unchanged; `PortError::StaleVersion` on a stale version
    async fn replace_ifr(&self, claim: IfrClaim) -> Result<IfrClaim, PortError>;

    async fn get_ifr(&self, id: ClaimId) -> Result<IfrClaim, PortError>;

    async fn find_ifr(&self, query: ClaimQuery) -> Result<Vec<IfrClaim>, PortError>;

    async fn insert_cr(&self, claim: CrClaim) -> Result<CrClaim, PortError>;

    async fn replace_cr(&self, claim: CrClaim) -> Result<CrClaim, PortError>;

    async fn get_cr(&self, id: ClaimId) -> Result<CrClaim, PortError>;

    async fn find_cr(&self, query: ClaimQuery) -> Result<Vec<CrClaim>, PortError>;
}

/// Storage for pit & plantation records
#[async_trait]
pub trait PlantationRepository: DomainPort {
    async fn insert(&self, record: PitRecord) -> Result<PitRecord, PortError>;

    /// Replace-if-unchanged; `PortError::StaleVersion` on a stale version
    async fn replace(&self, record: PitRecord) -> Result<PitRecord, PortError>;

    async fn get(&self, id: PitRecordId) -> Result<PitRecord, PortError>;

    async fn find(&self, query: PitRecordQuery) -> Result<Vec<PitRecord>, PortError>;
}

/// Append-only, hash-chained activity store
///
/// Appends happen after the entity write. `PortalService` logs a failed
/// append and still reports the operation as done, so the log can miss an
/// entry but never holds one for a write that did not happen.
#[async_trait]
pub trait ActivityLog: DomainPort {
    /// Chains a new entry onto the current head and stores it
    async fn append(&self, actor: &Actor, event: ActivityEvent) -> Result<ActivityEntry, PortError>;

    /// Up to `limit` entries, newest first
    async fn recent(&self, limit: usize) -> Result<Vec<ActivityEntry>, PortError>;

    /// The whole chain, oldest first
    async fn entries(&self) -> Result<Vec<ActivityEntry>, PortError>;
}
