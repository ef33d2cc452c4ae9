//! Versioned in-memory table
//!
//! The write lock is held across the version check and the insert, so a
//! replace either sees the value it was derived from or fails. A replacement
//! must also be a lifecycle step of the stored row: a review of a pending
//! claim, or the next survival check of a pit record.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use core_kernel::{ClaimId, PitRecordId, PortError};
use domain_claims::{is_review_of, ClaimRecord, CrClaim, IfrClaim};
use domain_plantation::{is_survival_check_of, PitRecord};

/// What the table needs to know about a stored value
pub trait Versioned: Clone + fmt::Debug + Send + Sync {
    type Id: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync;

    const ENTITY: &'static str;

    fn id(&self) -> Self::Id;
    fn version(&self) -> u32;
    fn submitted_at(&self) -> DateTime<Utc>;

    /// True when `self` may replace `stored`
    fn follows(&self, stored: &Self) -> bool;
}

impl Versioned for IfrClaim {
    type Id = ClaimId;
    const ENTITY: &'static str = "IfrClaim";

    fn id(&self) -> ClaimId {
        ClaimRecord::id(self)
    }
    fn version(&self) -> u32 {
        ClaimRecord::version(self)
    }
    fn submitted_at(&self) -> DateTime<Utc> {
        ClaimRecord::submitted_at(self)
    }
    fn follows(&self, stored: &Self) -> bool {
        is_review_of(stored, self)
    }
}

impl Versioned for CrClaim {
    type Id = ClaimId;
    const ENTITY: &'static str = "CrClaim";

    fn id(&self) -> ClaimId {
        ClaimRecord::id(self)
    }
    fn version(&self) -> u32 {
        ClaimRecord::version(self)
    }
    fn submitted_at(&self) -> DateTime<Utc> {
        ClaimRecord::submitted_at(self)
    }
    fn follows(&self, stored: &Self) -> bool {
        is_review_of(stored, self)
    }
}

impl Versioned for PitRecord {
    type Id = PitRecordId;
    const ENTITY: &'static str = "PitRecord";

    fn id(&self) -> PitRecordId {
        PitRecord::id(self)
    }
    fn version(&self) -> u32 {
        PitRecord::version(self)
    }
    fn submitted_at(&self) -> DateTime<Utc> {
        PitRecord::submitted_at(self)
    }
    fn follows(&self, stored: &Self) -> bool {
        is_survival_check_of(stored, self)
    }
}

#[derive(Debug)]
pub struct VersionedTable<V: Versioned> {
    rows: RwLock<HashMap<V::Id, V>>,
}

impl<V: Versioned> Default for VersionedTable<V> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }
}

impl<V: Versioned> VersionedTable<V> {
    pub async fn insert(&self, value: V) -> Result<V, PortError> {
        let mut rows = self.rows.write().await;
        let id = value.id();
        if rows.contains_key(&id) {
            return Err(PortError::already_exists(V::ENTITY, id));
        }
        rows.insert(id, value.clone());
        Ok(value)
    }

    /// Stores `value` only if it is exactly one version ahead of the stored
    /// row and follows from it
    pub async fn replace(&self, value: V) -> Result<V, PortError> {
        let mut rows = self.rows.write().await;
        let id = value.id();
        let stored = rows
            .get(&id)
            .ok_or_else(|| PortError::not_found(V::ENTITY, id))?;

        if stored.version() + 1 != value.version() {
            return Err(PortError::stale_version(
                V::ENTITY,
                id,
                stored.version(),
                value.version(),
            ));
        }
        if !value.follows(stored) {
            return Err(PortError::invalid_replacement(V::ENTITY, id));
        }
        rows.insert(id, value.clone());
        Ok(value)
    }

    pub async fn get(&self, id: V::Id) -> Result<V, PortError> {
        self.rows
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found(V::ENTITY, id))
    }

    /// Matching rows, oldest submission first
    pub async fn find(&self, mut predicate: impl FnMut(&V) -> bool) -> Vec<V> {
        let rows = self.rows.read().await;
        let mut found: Vec<V> = rows.values().filter(|v| predicate(v)).cloned().collect();
        found.sort_by_key(|v| (v.submitted_at(), v.id()));
        found
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}
