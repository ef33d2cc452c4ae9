//! In-memory activity log

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{Actor, DomainPort, PortError};
use forest_engine::{ActivityEntry, ActivityEvent, ActivityLog, GENESIS_HASH};

/// Hash-chained log kept as a vector, oldest first
#[derive(Debug, Default)]
pub struct InMemoryActivityLog {
    entries: RwLock<Vec<ActivityEntry>>,
}

impl InMemoryActivityLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for InMemoryActivityLog {}

#[async_trait]
impl ActivityLog for InMemoryActivityLog {
    async fn append(&self, actor: &Actor, event: ActivityEvent) -> Result<ActivityEntry, PortError> {
        let mut entries = self.entries.write().await;
        let prev_hash = entries
            .last()
            .map(|entry| entry.hash.as_str())
            .unwrap_or(GENESIS_HASH);

        let entry = ActivityEntry::chained(prev_hash, actor, event, Utc::now())
            .map_err(|err| PortError::storage("activity entry could not be encoded", err))?;
        entries.push(entry.clone());
        debug!(length = entries.len(), "Activity appended");
        Ok(entry)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ActivityEntry>, PortError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().rev().take(limit).cloned().collect())
    }

    async fn entries(&self) -> Result<Vec<ActivityEntry>, PortError> {
        Ok(self.entries.read().await.clone())
    }
}
