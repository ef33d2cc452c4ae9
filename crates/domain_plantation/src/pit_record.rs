//! Pit & plantation record aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

use core_kernel::{GeoPoint, Money, PitRecordId};
use crate::error::PlantationError;
use crate::incentive::IncentivePolicy;
use crate::survival::{check_photos, check_survival_rate, PlantationStage, SurvivalCheck, SurvivalYear};

/// Plantation record status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantationStatus {
    /// Survival tracking still in progress
    Active,
    /// Year-2 survival recorded; tracking finished
    Completed,
}

impl fmt::Display for PlantationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlantationStatus::Active => f.write_str("active"),
            PlantationStatus::Completed => f.write_str("completed"),
        }
    }
}

/// Request to register newly dug pits and planted saplings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PitRecordRequest {
    #[validate(length(min = 1), custom(function = "not_blank"))]
    pub farmer_id: String,
    #[validate(length(min = 1), custom(function = "not_blank"))]
    pub farmer_name: String,
    #[validate(length(min = 1), custom(function = "not_blank"))]
    pub village: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    pub pit_count: u32,
    pub sapling_count: u32,
    #[validate(length(min = 1, message = "at least one photo is required"))]
    pub photos: Vec<String>,
}

/// A tracked unit of afforestation work
///
/// The incentive is private and only ever computed from the pit count and
/// the latest survival rate through the [`IncentivePolicy`] the record was
/// registered under. Deserialized records are re-checked, and a stored
/// incentive that disagrees with that policy is refused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PitRecordFields")]
pub struct PitRecord {
    id: PitRecordId,
    farmer_id: String,
    farmer_name: String,
    village: String,
    location: GeoPoint,
    photos: Vec<String>,
    pit_count: u32,
    sapling_count: u32,
    year1: Option<SurvivalCheck>,
    year2: Option<SurvivalCheck>,
    incentive: Money,
    policy: IncentivePolicy,
    status: PlantationStatus,
    submitted_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
    version: u32,
}

#[derive(Deserialize)]
struct PitRecordFields {
    id: PitRecordId,
    farmer_id: String,
    farmer_name: String,
    village: String,
    location: GeoPoint,
    photos: Vec<String>,
    pit_count: u32,
    sapling_count: u32,
    year1: Option<SurvivalCheck>,
    year2: Option<SurvivalCheck>,
    incentive: Money,
    policy: IncentivePolicy,
    status: PlantationStatus,
    submitted_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
    version: u32,
}

impl TryFrom<PitRecordFields> for PitRecord {
    type Error = PlantationError;

    fn try_from(fields: PitRecordFields) -> Result<Self, Self::Error> {
        for (field, value) in [
            ("farmer_id", &fields.farmer_id),
            ("farmer_name", &fields.farmer_name),
            ("village", &fields.village),
        ] {
            if value.trim().is_empty() {
                return Err(PlantationError::validation(field, "must not be blank"));
            }
        }
        check_photos("photos", &fields.photos)?;
        if fields.sapling_count > fields.pit_count {
            return Err(PlantationError::validation(
                "sapling_count",
                format!("{} saplings exceed {} pits", fields.sapling_count, fields.pit_count),
            ));
        }

        // Checks happen in order, each bumping the version once
        let (version, status, last_updated) = match (&fields.year1, &fields.year2) {
            (None, None) => (1, PlantationStatus::Active, fields.submitted_at),
            (Some(first), None) => (2, PlantationStatus::Active, first.recorded_at),
            (Some(_), Some(second)) => (3, PlantationStatus::Completed, second.recorded_at),
            (None, Some(_)) => {
                return Err(PlantationError::validation("year1", "year-2 check without a year-1 check"));
            }
        };
        if fields.version != version || fields.status != status || fields.last_updated != last_updated {
            return Err(PlantationError::validation(
                "version",
                "version, status and last update do not match the recorded checks",
            ));
        }
        for (field, check) in [("year1", &fields.year1), ("year2", &fields.year2)] {
            if let Some(check) = check {
                check_survival_rate(check.survival_rate)
                    .map_err(|_| PlantationError::validation(field, "survival rate is outside [0, 100]"))?;
                check_photos(field, &check.photos)?;
            }
        }
        if let (Some(first), Some(second)) = (&fields.year1, &fields.year2) {
            if second.recorded_at < first.recorded_at {
                return Err(PlantationError::validation("year2", "year-2 check predates year-1 check"));
            }
        }

        let latest = fields.year2.as_ref().or(fields.year1.as_ref()).map(|c| c.survival_rate);
        if fields.incentive != fields.policy.incentive(fields.pit_count, latest) {
            return Err(PlantationError::validation(
                "incentive",
                "incentive does not match the record's policy",
            ));
        }

        Ok(Self {
            id: fields.id,
            farmer_id: fields.farmer_id,
            farmer_name: fields.farmer_name,
            village: fields.village,
            location: fields.location,
            photos: fields.photos,
            pit_count: fields.pit_count,
            sapling_count: fields.sapling_count,
            year1: fields.year1,
            year2: fields.year2,
            incentive: fields.incentive,
            policy: fields.policy,
            status: fields.status,
            submitted_at: fields.submitted_at,
            last_updated: fields.last_updated,
            version: fields.version,
        })
    }
}

impl PitRecord {
    pub fn id(&self) -> PitRecordId {
        self.id
    }

    pub fn farmer_id(&self) -> &str {
        &self.farmer_id
    }

    pub fn farmer_name(&self) -> &str {
        &self.farmer_name
    }

    pub fn village(&self) -> &str {
        &self.village
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    pub fn pit_count(&self) -> u32 {
        self.pit_count
    }

    pub fn sapling_count(&self) -> u32 {
        self.sapling_count
    }

    pub fn survival_check(&self, year: SurvivalYear) -> Option<&SurvivalCheck> {
        match year {
            SurvivalYear::First => self.year1.as_ref(),
            SurvivalYear::Second => self.year2.as_ref(),
        }
    }

    /// Survival rate of the most recent check, if any
    pub fn latest_survival_rate(&self) -> Option<Decimal> {
        self.year2
            .as_ref()
            .or(self.year1.as_ref())
            .map(|check| check.survival_rate)
    }

    pub fn incentive(&self) -> Money {
        self.incentive
    }

    /// Policy the record was registered under
    pub fn policy(&self) -> &IncentivePolicy {
        &self.policy
    }

    pub fn status(&self) -> PlantationStatus {
        self.status
    }

    pub fn stage(&self) -> PlantationStage {
        match (&self.year1, &self.year2) {
            (_, Some(_)) => PlantationStage::Completed,
            (Some(_), None) => PlantationStage::AwaitingYearTwo,
            (None, None) => PlantationStage::AwaitingYearOne,
        }
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub(crate) fn with_survival_check(&self, year: SurvivalYear, check: SurvivalCheck) -> Self {
        let mut next = self.clone();
        next.last_updated = check.recorded_at;
        match year {
            SurvivalYear::First => next.year1 = Some(check),
            SurvivalYear::Second => {
                next.year2 = Some(check);
                next.status = PlantationStatus::Completed;
            }
        }
        next.incentive = self.policy.incentive(next.pit_count, next.latest_survival_rate());
        next.version += 1;
        next
    }
}

/// Registers a new pit & plantation record
///
/// The record starts `Active` with no survival data and the flat per-pit
/// incentive. It keeps `policy` for every later recomputation.
///
/// # Errors
///
/// Returns `PlantationError::Validation` if saplings exceed pits, no photos
/// are attached, or coordinates are out of range.
pub fn submit_pit_record(
    request: PitRecordRequest,
    policy: &IncentivePolicy,
    at: DateTime<Utc>,
) -> Result<PitRecord, PlantationError> {
    request.validate()?;
    check_photos("photos", &request.photos)?;
    if request.sapling_count > request.pit_count {
        return Err(PlantationError::validation(
            "sapling_count",
            format!(
                "{} saplings exceed {} pits",
                request.sapling_count, request.pit_count
            ),
        ));
    }
    let location = GeoPoint::new(request.latitude, request.longitude)?;

    Ok(PitRecord {
        id: PitRecordId::new_v7(),
        farmer_id: request.farmer_id,
        farmer_name: request.farmer_name,
        village: request.village,
        location,
        photos: request.photos,
        pit_count: request.pit_count,
        sapling_count: request.sapling_count,
        year1: None,
        year2: None,
        incentive: policy.incentive(request.pit_count, None),
        policy: *policy,
        status: PlantationStatus::Active,
        submitted_at: at,
        last_updated: at,
        version: 1,
    })
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
