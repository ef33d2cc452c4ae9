//! IFR and CR claim aggregates
//!
//! Fields are private: the only way to obtain a claim is through
//! [`crate::submission`], and the only way to change its state is through
//! [`crate::review::review_claim`], which returns a replacement value.
//!
//! Deserialized claims are checked against the same rules before they
//! exist: a pending claim is at version 1, a reviewed one at version 2 with
//! a reviewer, and a rejected one also carries its reason.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{ClaimId, GeoPoint};
use crate::error::ClaimError;

/// Claim status as shown on dashboards and used in queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
}

impl ClaimStatus {
    /// Approved and rejected claims never change again
    pub fn is_terminal(&self) -> bool {
        match self {
            ClaimStatus::Pending => false,
            ClaimStatus::Approved | ClaimStatus::Rejected => true,
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
        };
        f.write_str(label)
    }
}

/// Claim lifecycle state carrying the review metadata of each outcome
///
/// Review fields exist only on the variants that need them, so a pending
/// claim cannot carry a reviewer and a rejected claim cannot lack a reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClaimState {
    /// Awaiting guard/admin review
    Pending,

    /// Claim accepted
    Approved {
        reviewed_by: String,
        reviewed_at: DateTime<Utc>,
    },

    /// Claim refused
    Rejected {
        reviewed_by: String,
        reviewed_at: DateTime<Utc>,
        rejection_reason: String,
    },
}

impl ClaimState {
    pub fn status(&self) -> ClaimStatus {
        match self {
            ClaimState::Pending => ClaimStatus::Pending,
            ClaimState::Approved { .. } => ClaimStatus::Approved,
            ClaimState::Rejected { .. } => ClaimStatus::Rejected,
        }
    }

    pub fn reviewed_by(&self) -> Option<&str> {
        match self {
            ClaimState::Pending => None,
            ClaimState::Approved { reviewed_by, .. }
            | ClaimState::Rejected { reviewed_by, .. } => Some(reviewed_by),
        }
    }

    pub fn reviewed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            ClaimState::Pending => None,
            ClaimState::Approved { reviewed_at, .. }
            | ClaimState::Rejected { reviewed_at, .. } => Some(*reviewed_at),
        }
    }

    pub fn rejection_reason(&self) -> Option<&str> {
        match self {
            ClaimState::Rejected { rejection_reason, .. } => Some(rejection_reason),
            ClaimState::Pending | ClaimState::Approved { .. } => None,
        }
    }

    /// Version a claim holds while in this state
    fn expected_version(&self) -> u32 {
        match self {
            ClaimState::Pending => 1,
            ClaimState::Approved { .. } | ClaimState::Rejected { .. } => 2,
        }
    }

    fn check(&self, submitted_at: DateTime<Utc>, version: u32) -> Result<(), ClaimError> {
        if version != self.expected_version() {
            return Err(ClaimError::validation(
                "version",
                format!("a {} claim is at version {}, got {}", self.status(), self.expected_version(), version),
            ));
        }
        if let Some(reviewer) = self.reviewed_by() {
            require_text("reviewed_by", reviewer)?;
        }
        if let Some(reviewed_at) = self.reviewed_at() {
            if reviewed_at < submitted_at {
                return Err(ClaimError::validation("reviewed_at", "review predates submission"));
            }
        }
        if let Some(reason) = self.rejection_reason() {
            require_text("rejection_reason", reason)?;
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<(), ClaimError> {
    if value.trim().is_empty() {
        return Err(ClaimError::validation(field, "must not be blank"));
    }
    Ok(())
}

fn check_filing(farmer_id: &str, farmer_name: &str, village: &str, documents: &[String]) -> Result<(), ClaimError> {
    require_text("farmer_id", farmer_id)?;
    require_text("farmer_name", farmer_name)?;
    require_text("village", village)?;
    if documents.is_empty() {
        return Err(ClaimError::validation("documents", "at least one document is required"));
    }
    documents
        .iter()
        .try_for_each(|document| require_text("documents", document))
}

/// Which kind of claim a record is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimKind {
    /// Individual Forest Rights
    Ifr,
    /// Community Forest Rights
    Cr,
}

impl fmt::Display for ClaimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimKind::Ifr => f.write_str("IFR"),
            ClaimKind::Cr => f.write_str("CR"),
        }
    }
}

/// Read access shared by both claim kinds
pub trait ClaimRecord {
    /// Kind of this claim type
    const KIND: ClaimKind;

    fn id(&self) -> ClaimId;
    fn farmer_id(&self) -> &str;
    fn farmer_name(&self) -> &str;
    fn village(&self) -> &str;
    fn documents(&self) -> &[String];
    fn state(&self) -> &ClaimState;
    fn submitted_at(&self) -> DateTime<Utc>;

    /// Bumped on every replacement; used for replace-if-unchanged storage
    fn version(&self) -> u32;

    fn status(&self) -> ClaimStatus {
        self.state().status()
    }
}

/// An Individual Forest Rights claim over a single parcel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IfrClaimFields")]
pub struct IfrClaim {
    id: ClaimId,
    farmer_id: String,
    farmer_name: String,
    village: String,
    /// Claimed area in hectares, always positive
    hectares: Decimal,
    location: GeoPoint,
    documents: Vec<String>,
    state: ClaimState,
    submitted_at: DateTime<Utc>,
    version: u32,
}

#[derive(Deserialize)]
struct IfrClaimFields {
    id: ClaimId,
    farmer_id: String,
    farmer_name: String,
    village: String,
    hectares: Decimal,
    location: GeoPoint,
    documents: Vec<String>,
    state: ClaimState,
    submitted_at: DateTime<Utc>,
    version: u32,
}

impl TryFrom<IfrClaimFields> for IfrClaim {
    type Error = ClaimError;

    fn try_from(fields: IfrClaimFields) -> Result<Self, Self::Error> {
        check_filing(&fields.farmer_id, &fields.farmer_name, &fields.village, &fields.documents)?;
        if fields.hectares <= Decimal::ZERO {
            return Err(ClaimError::validation("hectares", "must be greater than zero"));
        }
        fields.state.check(fields.submitted_at, fields.version)?;

        Ok(Self {
            id: fields.id,
            farmer_id: fields.farmer_id,
            farmer_name: fields.farmer_name,
            village: fields.village,
            hectares: fields.hectares,
            location: fields.location,
            documents: fields.documents,
            state: fields.state,
            submitted_at: fields.submitted_at,
            version: fields.version,
        })
    }
}

impl IfrClaim {
    pub(crate) fn new(
        farmer_id: String,
        farmer_name: String,
        village: String,
        hectares: Decimal,
        location: GeoPoint,
        documents: Vec<String>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ClaimId::new_v7(),
            farmer_id,
            farmer_name,
            village,
            hectares,
            location,
            documents,
            state: ClaimState::Pending,
            submitted_at,
            version: 1,
        }
    }

    pub fn hectares(&self) -> Decimal {
        self.hectares
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub(crate) fn with_state(&self, state: ClaimState) -> Self {
        Self {
            state,
            version: self.version + 1,
            ..self.clone()
        }
    }
}

impl ClaimRecord for IfrClaim {
    const KIND: ClaimKind = ClaimKind::Ifr;

    fn id(&self) -> ClaimId {
        self.id
    }

    fn farmer_id(&self) -> &str {
        &self.farmer_id
    }

    fn farmer_name(&self) -> &str {
        &self.farmer_name
    }

    fn village(&self) -> &str {
        &self.village
    }

    fn documents(&self) -> &[String] {
        &self.documents
    }

    fn state(&self) -> &ClaimState {
        &self.state
    }

    fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    fn version(&self) -> u32 {
        self.version
    }
}

/// A Community Forest Rights claim filed for a whole village
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CrClaimFields")]
pub struct CrClaim {
    id: ClaimId,
    farmer_id: String,
    farmer_name: String,
    village: String,
    documents: Vec<String>,
    /// Boundary shapefile reference, if one was attached
    shapefile: Option<String>,
    state: ClaimState,
    submitted_at: DateTime<Utc>,
    version: u32,
}

#[derive(Deserialize)]
struct CrClaimFields {
    id: ClaimId,
    farmer_id: String,
    farmer_name: String,
    village: String,
    documents: Vec<String>,
    shapefile: Option<String>,
    state: ClaimState,
    submitted_at: DateTime<Utc>,
    version: u32,
}

impl TryFrom<CrClaimFields> for CrClaim {
    type Error = ClaimError;

    fn try_from(fields: CrClaimFields) -> Result<Self, Self::Error> {
        check_filing(&fields.farmer_id, &fields.farmer_name, &fields.village, &fields.documents)?;
        if let Some(shapefile) = &fields.shapefile {
            require_text("shapefile", shapefile)?;
        }
        fields.state.check(fields.submitted_at, fields.version)?;

        Ok(Self {
            id: fields.id,
            farmer_id: fields.farmer_id,
            farmer_name: fields.farmer_name,
            village: fields.village,
            documents: fields.documents,
            shapefile: fields.shapefile,
            state: fields.state,
            submitted_at: fields.submitted_at,
            version: fields.version,
        })
    }
}

impl CrClaim {
    pub(crate) fn new(
        farmer_id: String,
        farmer_name: String,
        village: String,
        documents: Vec<String>,
        shapefile: Option<String>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ClaimId::new_v7(),
            farmer_id,
            farmer_name,
            village,
            documents,
            shapefile,
            state: ClaimState::Pending,
            submitted_at,
            version: 1,
        }
    }

    pub fn shapefile(&self) -> Option<&str> {
        self.shapefile.as_deref()
    }

    pub(crate) fn with_state(&self, state: ClaimState) -> Self {
        Self {
            state,
            version: self.version + 1,
            ..self.clone()
        }
    }
}

impl ClaimRecord for CrClaim {
    const KIND: ClaimKind = ClaimKind::Cr;

    fn id(&self) -> ClaimId {
        self.id
    }

    fn farmer_id(&self) -> &str {
        &self.farmer_id
    }

    fn farmer_name(&self) -> &str {
        &self.farmer_name
    }

    fn village(&self) -> &str {
        &self.village
    }

    fn documents(&self) -> &[String] {
        &self.documents
    }

    fn state(&self) -> &ClaimState {
        &self.state
    }

    fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    fn version(&self) -> u32 {
        self.version
    }
}
