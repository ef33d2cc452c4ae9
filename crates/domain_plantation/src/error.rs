//! Plantation domain errors

use thiserror::Error;
use validator::ValidationErrors;

use core_kernel::GeoError;
use crate::survival::{PlantationStage, SurvivalYear};

/// Errors that can occur in the plantation domain
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlantationError {
    /// A submitted value violates a field constraint
    #[error("Validation failed on {field}: {message}")]
    Validation { field: String, message: String },

    /// The record is not at the stage the requested check needs
    #[error("Cannot record {to} survival check on a record that is {from}")]
    InvalidTransition { from: PlantationStage, to: SurvivalYear },
}

impl PlantationError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PlantationError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PlantationError::Validation { .. })
    }

    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, PlantationError::InvalidTransition { .. })
    }
}

impl From<ValidationErrors> for PlantationError {
    fn from(errors: ValidationErrors) -> Self {
        let field = errors
            .errors()
            .keys()
            .map(|key| key.to_string())
            .min()
            .unwrap_or_else(|| "request".to_string());
        PlantationError::Validation {
            field,
            message: errors.to_string(),
        }
    }
}

impl From<GeoError> for PlantationError {
    fn from(error: GeoError) -> Self {
        PlantationError::validation(error.field(), error.to_string())
    }
}
