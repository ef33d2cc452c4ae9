//! Yearly survival verification

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PlantationError;
use crate::pit_record::PitRecord;

/// Which yearly check is being recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SurvivalYear {
    First,
    Second,
}

impl TryFrom<u8> for SurvivalYear {
    type Error = PlantationError;

    fn try_from(year: u8) -> Result<Self, Self::Error> {
        match year {
            1 => Ok(SurvivalYear::First),
            2 => Ok(SurvivalYear::Second),
            other => Err(PlantationError::validation(
                "year",
                format!("survival year must be 1 or 2, got {}", other),
            )),
        }
    }
}

impl From<SurvivalYear> for u8 {
    fn from(year: SurvivalYear) -> u8 {
        match year {
            SurvivalYear::First => 1,
            SurvivalYear::Second => 2,
        }
    }
}

impl fmt::Display for SurvivalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "year-{}", u8::from(*self))
    }
}

/// Where a record stands in survival tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantationStage {
    AwaitingYearOne,
    AwaitingYearTwo,
    Completed,
}

impl PlantationStage {
    /// The check this stage accepts next, if any
    pub fn next_check(&self) -> Option<SurvivalYear> {
        match self {
            PlantationStage::AwaitingYearOne => Some(SurvivalYear::First),
            PlantationStage::AwaitingYearTwo => Some(SurvivalYear::Second),
            PlantationStage::Completed => None,
        }
    }
}

impl fmt::Display for PlantationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlantationStage::AwaitingYearOne => f.write_str("awaiting year-1 check"),
            PlantationStage::AwaitingYearTwo => f.write_str("awaiting year-2 check"),
            PlantationStage::Completed => f.write_str("completed"),
        }
    }
}

/// Photos and survival percentage from one yearly check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurvivalCheck {
    pub photos: Vec<String>,
    /// Percentage of planted saplings still alive, in `[0, 100]`
    pub survival_rate: Decimal,
    pub recorded_at: DateTime<Utc>,
}

/// Records a yearly survival check and recomputes the incentive
///
/// Checks are strictly sequential: year 1, then year 2. Each year is
/// recorded once; recording year 2 completes the record. The incentive is
/// recomputed with the policy the record was registered under.
///
/// # Errors
///
/// * `PlantationError::InvalidTransition` if the requested year is not the
///   next one the record accepts (year 2 before year 1, repeats, or any
///   check on a completed record)
/// * `PlantationError::Validation` if the rate is outside `[0, 100]` or no
///   photos are attached
pub fn record_survival_check(
    record: &PitRecord,
    year: SurvivalYear,
    survival_rate: Decimal,
    photos: Vec<String>,
    at: DateTime<Utc>,
) -> Result<PitRecord, PlantationError> {
    let stage = record.stage();
    if stage.next_check() != Some(year) {
        return Err(PlantationError::InvalidTransition { from: stage, to: year });
    }

    check_survival_rate(survival_rate)?;
    check_photos("photos", &photos)?;

    let check = SurvivalCheck {
        photos,
        survival_rate,
        recorded_at: at,
    };
    Ok(record.with_survival_check(year, check))
}

/// True when `next` is `previous` with its next survival check recorded
///
/// Storage uses this to refuse replacements that did not come from
/// [`record_survival_check`].
pub fn is_survival_check_of(previous: &PitRecord, next: &PitRecord) -> bool {
    let Some(year) = previous.stage().next_check() else {
        return false;
    };
    match next.survival_check(year) {
        Some(check) => *next == previous.with_survival_check(year, check.clone()),
        None => false,
    }
}

pub(crate) fn check_survival_rate(survival_rate: Decimal) -> Result<(), PlantationError> {
    if survival_rate < dec!(0) || survival_rate > dec!(100) {
        return Err(PlantationError::validation(
            "survival_rate",
            format!("survival rate {} is outside [0, 100]", survival_rate),
        ));
    }
    Ok(())
}

pub(crate) fn check_photos(field: &str, photos: &[String]) -> Result<(), PlantationError> {
    if photos.is_empty() || photos.iter().any(|photo| photo.trim().is_empty()) {
        return Err(PlantationError::validation(field, "at least one photo is required"));
    }
    Ok(())
}
