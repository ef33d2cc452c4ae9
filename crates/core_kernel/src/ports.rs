//! Port infrastructure
//!
//! Repository traits live next to the use cases that need them; storage
//! adapters implement those traits and report failures as [`PortError`].
//!
//! ```text
//!   PortalService ──► ClaimRepository / PlantationRepository / ActivityLog
//!                                   ▲
//!                                   │ implements
//!                            in-memory adapter
//! ```
//!
//! Writes of existing entities are replace-if-unchanged: the replacement must
//! carry the stored version plus one, otherwise the adapter answers
//! [`PortError::StaleVersion`]. A replacement that is not a lifecycle step
//! of the stored value is refused with [`PortError::InvalidReplacement`].

use std::fmt;
use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum PortError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} {id} already exists")]
    AlreadyExists { entity: &'static str, id: String },

    /// Another writer stored a newer version first
    #[error("{entity} {id} was changed concurrently (stored version {stored}, replacement version {attempted})")]
    StaleVersion {
        entity: &'static str,
        id: String,
        stored: u32,
        attempted: u32,
    },

    /// The replacement is not a transition the stored value can make
    #[error("{entity} {id} cannot be replaced with the given value")]
    InvalidReplacement { entity: &'static str, id: String },

    #[error("Storage failure: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl PortError {
    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn already_exists(entity: &'static str, id: impl fmt::Display) -> Self {
        PortError::AlreadyExists {
            entity,
            id: id.to_string(),
        }
    }

    pub fn stale_version(entity: &'static str, id: impl fmt::Display, stored: u32, attempted: u32) -> Self {
        PortError::StaleVersion {
            entity,
            id: id.to_string(),
            stored,
            attempted,
        }
    }

    pub fn invalid_replacement(entity: &'static str, id: impl fmt::Display) -> Self {
        PortError::InvalidReplacement {
            entity,
            id: id.to_string(),
        }
    }

    /// Wraps a backend failure
    pub fn storage(message: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        PortError::Storage {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }

    pub fn is_invalid_replacement(&self) -> bool {
        matches!(self, PortError::InvalidReplacement { .. })
    }

    /// True when a concurrent writer got there first
    pub fn is_conflict(&self) -> bool {
        matches!(self, PortError::StaleVersion { .. })
    }
}

/// Marker for port traits; adapters are shared behind `Arc<dyn _>`
pub trait DomainPort: Send + Sync + 'static {}
