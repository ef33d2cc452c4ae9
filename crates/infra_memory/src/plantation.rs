//! In-memory plantation repository

use async_trait::async_trait;
use tracing::debug;

use core_kernel::{DomainPort, PitRecordId, PortError};
use domain_plantation::PitRecord;
use forest_engine::{PitRecordQuery, PlantationRepository};

use crate::table::VersionedTable;

#[derive(Debug, Default)]
pub struct InMemoryPlantationRepository {
    records: VersionedTable<PitRecord>,
}

impl InMemoryPlantationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_records(records: Vec<PitRecord>) -> Result<Self, PortError> {
        let repo = Self::new();
        for record in records {
            repo.records.insert(record).await?;
        }
        Ok(repo)
    }
}

impl DomainPort for InMemoryPlantationRepository {}

#[async_trait]
impl PlantationRepository for InMemoryPlantationRepository {
    async fn insert(&self, record: PitRecord) -> Result<PitRecord, PortError> {
        self.records.insert(record).await
    }

    async fn replace(&self, record: PitRecord) -> Result<PitRecord, PortError> {
        self.records.replace(record).await
    }

    async fn get(&self, id: PitRecordId) -> Result<PitRecord, PortError> {
        self.records.get(id).await
    }

    async fn find(&self, query: PitRecordQuery) -> Result<Vec<PitRecord>, PortError> {
        let found = self.records.find(|record| query.matches(record)).await;
        debug!(?query, count = found.len(), "Pit records found");
        Ok(found)
    }
}
