//! In-memory claim repository

use async_trait::async_trait;
use tracing::debug;

use core_kernel::{ClaimId, DomainPort, PortError};
use domain_claims::{CrClaim, IfrClaim};
use forest_engine::{ClaimQuery, ClaimRepository};

use crate::table::VersionedTable;

#[derive(Debug, Default)]
pub struct InMemoryClaimRepository {
    ifr: VersionedTable<IfrClaim>,
    cr: VersionedTable<CrClaim>,
}

impl InMemoryClaimRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates with claims, e.g. demo data
    pub async fn with_claims(ifr: Vec<IfrClaim>, cr: Vec<CrClaim>) -> Result<Self, PortError> {
        let repo = Self::new();
        for claim in ifr {
            repo.ifr.insert(claim).await?;
        }
        for claim in cr {
            repo.cr.insert(claim).await?;
        }
        Ok(repo)
    }
}

impl DomainPort for InMemoryClaimRepository {}

#[async_trait]
impl ClaimRepository for InMemoryClaimRepository {
    async fn insert_ifr(&self, claim: IfrClaim) -> Result<IfrClaim, PortError> {
        self.ifr.insert(claim).await
    }

    async fn replace_ifr(&self, claim: IfrClaim) -> Result<IfrClaim, PortError> {
        self.ifr.replace(claim).await
    }

    async fn get_ifr(&self, id: ClaimId) -> Result<IfrClaim, PortError> {
        self.ifr.get(id).await
    }

    async fn find_ifr(&self, query: ClaimQuery) -> Result<Vec<IfrClaim>, PortError> {
        let found = self.ifr.find(|claim| query.matches(claim)).await;
        debug!(?query, count = found.len(), "IFR claims found");
        Ok(found)
    }

    async fn insert_cr(&self, claim: CrClaim) -> Result<CrClaim, PortError> {
        self.cr.insert(claim).await
    }

    async fn replace_cr(&self, claim: CrClaim) -> Result<CrClaim, PortError> {
        self.cr.replace(claim).await
    }

    async fn get_cr(&self, id: ClaimId) -> Result<CrClaim, PortError> {
        self.cr.get(id).await
    }

    async fn find_cr(&self, query: ClaimQuery) -> Result<Vec<CrClaim>, PortError> {
        let found = self.cr.find(|claim| query.matches(claim)).await;
        debug!(?query, count = found.len(), "CR claims found");
        Ok(found)
    }
}
