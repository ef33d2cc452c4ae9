//! Claims domain errors

use thiserror::Error;
use validator::ValidationErrors;

use core_kernel::GeoError;
use crate::claim::ClaimStatus;

/// Errors that can occur in the claims domain
///
/// Every variant is recoverable: nothing is constructed or replaced when an
/// operation fails.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClaimError {
    /// A submitted value violates a field constraint
    #[error("Validation failed on {field}: {message}")]
    Validation { field: String, message: String },

    /// The claim is not in the state the operation requires
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: ClaimStatus, to: ClaimStatus },
}

impl ClaimError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ClaimError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClaimError::Validation { .. })
    }

    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, ClaimError::InvalidTransition { .. })
    }
}

impl From<ValidationErrors> for ClaimError {
    fn from(errors: ValidationErrors) -> Self {
        // Report the alphabetically first field so the error is stable
        let field = errors
            .errors()
            .keys()
            .map(|key| key.to_string())
            .min()
            .unwrap_or_else(|| "request".to_string());
        ClaimError::Validation {
            field,
            message: errors.to_string(),
        }
    }
}

impl From<GeoError> for ClaimError {
    fn from(error: GeoError) -> Self {
        ClaimError::validation(error.field(), error.to_string())
    }
}
