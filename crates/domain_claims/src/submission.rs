//! Claim submission requests
//!
//! Form input arrives pre-checked by the UI, but every constraint is checked
//! again here before a claim value is constructed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use core_kernel::GeoPoint;
use crate::claim::{CrClaim, IfrClaim};
use crate::error::ClaimError;

/// Request to file an Individual Forest Rights claim
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IfrClaimRequest {
    #[validate(custom(function = "not_blank"))]
    pub farmer_id: String,
    #[validate(custom(function = "not_blank"))]
    pub farmer_name: String,
    #[validate(custom(function = "not_blank"))]
    pub village: String,
    #[validate(custom(function = "positive"))]
    pub hectares: Decimal,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(length(min = 1, message = "at least one document is required"), custom(function = "no_blank_entries"))]
    pub documents: Vec<String>,
}

/// Request to file a Community Forest Rights claim
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CrClaimRequest {
    #[validate(custom(function = "not_blank"))]
    pub farmer_id: String,
    #[validate(custom(function = "not_blank"))]
    pub farmer_name: String,
    #[validate(custom(function = "not_blank"))]
    pub village: String,
    #[validate(length(min = 1, message = "at least one document is required"), custom(function = "no_blank_entries"))]
    pub documents: Vec<String>,
    #[validate(custom(function = "not_blank"))]
    pub shapefile: Option<String>,
}

/// Creates a pending IFR claim from a validated request
///
/// # Errors
///
/// Returns `ClaimError::Validation` if hectares is not positive, the
/// coordinates are outside WGS84 ranges, or no documents are attached.
pub fn submit_ifr_claim(request: IfrClaimRequest, at: DateTime<Utc>) -> Result<IfrClaim, ClaimError> {
    request.validate()?;
    let location = GeoPoint::new(request.latitude, request.longitude)?;

    Ok(IfrClaim::new(
        request.farmer_id,
        request.farmer_name,
        request.village,
        request.hectares,
        location,
        request.documents,
        at,
    ))
}

/// Creates a pending CR claim from a validated request
///
/// # Errors
///
/// Returns `ClaimError::Validation` if no documents are attached or a
/// required identity field is blank.
pub fn submit_cr_claim(request: CrClaimRequest, at: DateTime<Utc>) -> Result<CrClaim, ClaimError> {
    request.validate()?;

    Ok(CrClaim::new(
        request.farmer_id,
        request.farmer_name,
        request.village,
        request.documents,
        request.shapefile,
        at,
    ))
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

fn no_blank_entries(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().any(|value| value.trim().is_empty()) {
        let mut error = ValidationError::new("blank_entry");
        error.message = Some("references must not be blank".into());
        return Err(error);
    }
    Ok(())
}

fn positive(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() || value.is_zero() {
        let mut error = ValidationError::new("not_positive");
        error.message = Some("must be greater than zero".into());
        return Err(error);
    }
    Ok(())
}
