//! Engine error types

use thiserror::Error;

use core_kernel::{PortError, UserRole};
use domain_claims::ClaimError;
use domain_plantation::PlantationError;

/// Errors surfaced by the engine and the portal service
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Claim(#[from] ClaimError),

    #[error(transparent)]
    Plantation(#[from] PlantationError),

    #[error("Storage error: {0}")]
    Port(#[from] PortError),

    #[error("Report export failed: {0}")]
    Export(#[from] serde_json::Error),

    /// The actor's role does not permit the operation
    #[error("Forbidden: {role} may not {action}")]
    Forbidden { role: UserRole, action: String },
}

impl EngineError {
    pub fn forbidden(role: UserRole, action: impl Into<String>) -> Self {
        EngineError::Forbidden {
            role,
            action: action.into(),
        }
    }

    /// A bad field value; the caller should correct the input
    pub fn is_validation(&self) -> bool {
        match self {
            EngineError::Claim(err) => err.is_validation(),
            EngineError::Plantation(err) => err.is_validation(),
            _ => false,
        }
    }

    /// The entity was in the wrong state; the caller should refresh and retry
    pub fn is_invalid_transition(&self) -> bool {
        match self {
            EngineError::Claim(err) => err.is_invalid_transition(),
            EngineError::Plantation(err) => err.is_invalid_transition(),
            _ => false,
        }
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, EngineError::Forbidden { .. })
    }

    /// Another writer replaced the entity between read and write
    pub fn is_conflict(&self) -> bool {
        matches!(self, EngineError::Port(err) if err.is_conflict())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::Port(err) if err.is_not_found())
    }
}
