//! Simulated storage latency
//!
//! Wrappers that sleep before delegating each call, so concurrent use cases
//! interleave the way they would against a remote store. Used to drive two
//! reviews of the same claim into the replace-if-unchanged conflict.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, PitRecordId, PortError};
use domain_claims::{CrClaim, IfrClaim};
use domain_plantation::PitRecord;
use forest_engine::{ClaimQuery, ClaimRepository, PitRecordQuery, PlantationRepository};

/// Delays every call to an inner claim repository
pub struct DelayedClaimRepository {
    inner: Arc<dyn ClaimRepository>,
    delay: Duration,
}

impl DelayedClaimRepository {
    pub fn new(inner: Arc<dyn ClaimRepository>, delay: Duration) -> Self {
        Self { inner, delay }
    }

    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

impl DomainPort for DelayedClaimRepository {}

#[async_trait]
impl ClaimRepository for DelayedClaimRepository {
    async fn insert_ifr(&self, claim: IfrClaim) -> Result<IfrClaim, PortError> {
        self.pause().await;
        self.inner.insert_ifr(claim).await
    }

    async fn replace_ifr(&self, claim: IfrClaim) -> Result<IfrClaim, PortError> {
        self.pause().await;
        self.inner.replace_ifr(claim).await
    }

    async fn get_ifr(&self, id: ClaimId) -> Result<IfrClaim, PortError> {
        self.pause().await;
        self.inner.get_ifr(id).await
    }

    async fn find_ifr(&self, query: ClaimQuery) -> Result<Vec<IfrClaim>, PortError> {
        self.pause().await;
        self.inner.find_ifr(query).await
    }

    async fn insert_cr(&self, claim: CrClaim) -> Result<CrClaim, PortError> {
        self.pause().await;
        self.inner.insert_cr(claim).await
    }

    async fn replace_cr(&self, claim: CrClaim) -> Result<CrClaim, PortError> {
        self.pause().await;
        self.inner.replace_cr(claim).await
    }

    async fn get_cr(&self, id: ClaimId) -> Result<CrClaim, PortError> {
        self.pause().await;
        self.inner.get_cr(id).await
    }

    async fn find_cr(&self, query: ClaimQuery) -> Result<Vec<CrClaim>, PortError> {
        self.pause().await;
        self.inner.find_cr(query).await
    }
}

/// Delays every call to an inner plantation repository
pub struct DelayedPlantationRepository {
    inner: Arc<dyn PlantationRepository>,
    delay: Duration,
}

impl DelayedPlantationRepository {
    pub fn new(inner: Arc<dyn PlantationRepository>, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

impl DomainPort for DelayedPlantationRepository {}

#[async_trait]
impl PlantationRepository for DelayedPlantationRepository {
    async fn insert(&self, record: PitRecord) -> Result<PitRecord, PortError> {
        tokio::time::sleep(self.delay).await;
        self.inner.insert(record).await
    }

    async fn replace(&self, record: PitRecord) -> Result<PitRecord, PortError> {
        tokio::time::sleep(self.delay).await;
        self.inner.replace(record).await
    }

    async fn get(&self, id: PitRecordId) -> Result<PitRecord, PortError> {
        tokio::time::sleep(self.delay).await;
        self.inner.get(id).await
    }

    async fn find(&self, query: PitRecordQuery) -> Result<Vec<PitRecord>, PortError> {
        tokio::time::sleep(self.delay).await;
        self.inner.find(query).await
    }
}
