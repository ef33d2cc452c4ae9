//! In-memory storage adapters
//!
//! Implementations of the engine's repository ports backed by
//! `tokio::sync::RwLock<HashMap<..>>`. They stand in for the mock data arrays
//! of a demo deployment and for databases in tests.
//!
//! ```rust,ignore
//! let store = MemoryStore::new();
//! let service = store.portal_service(ClaimLifecycleEngine::default());
//! ```

pub mod table;
pub mod claims;
pub mod plantation;
pub mod activity;

use std::sync::Arc;

use forest_engine::{ClaimLifecycleEngine, PortalService};

pub use claims::InMemoryClaimRepository;
pub use plantation::InMemoryPlantationRepository;
pub use activity::InMemoryActivityLog;

/// One of each adapter, shareable across services
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub claims: Arc<InMemoryClaimRepository>,
    pub plantations: Arc<InMemoryPlantationRepository>,
    pub activity: Arc<InMemoryActivityLog>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wires a portal service over this store
    pub fn portal_service(&self, engine: ClaimLifecycleEngine) -> PortalService {
        PortalService::new(
            engine,
            self.claims.clone(),
            self.plantations.clone(),
            self.activity.clone(),
        )
    }
}
