//! Incentive policy
//!
//! Farmers are paid a fixed amount per pit. Before any survival check the
//! full per-pit amount applies; once a check exists the amount is scaled by
//! the most recent survival rate and rounded to a whole currency unit.
//!
//! The per-pit rate is capped at [`MAX_RATE_PER_PIT`], which keeps
//! `u32::MAX` pits at full survival well inside `Decimal` range.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money};
use crate::error::PlantationError;

/// Reference payout per pit, in rupees
pub const DEFAULT_RATE_PER_PIT: i64 = 20;

/// Largest accepted payout per pit, in whole currency units
pub const MAX_RATE_PER_PIT: i64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PolicyFields")]
pub struct IncentivePolicy {
    base_rate_per_pit: Money,
}

#[derive(Deserialize)]
struct PolicyFields {
    base_rate_per_pit: Money,
}

impl TryFrom<PolicyFields> for IncentivePolicy {
    type Error = PlantationError;

    fn try_from(fields: PolicyFields) -> Result<Self, Self::Error> {
        IncentivePolicy::new(fields.base_rate_per_pit)
    }
}

impl IncentivePolicy {
    /// Creates a policy with a custom per-pit rate
    ///
    /// # Errors
    ///
    /// Returns `PlantationError::Validation` for a negative rate or one
    /// above [`MAX_RATE_PER_PIT`].
    pub fn new(base_rate_per_pit: Money) -> Result<Self, PlantationError> {
        if base_rate_per_pit.is_negative() {
            return Err(PlantationError::validation(
                "base_rate_per_pit",
                "rate per pit must not be negative",
            ));
        }
        if base_rate_per_pit.amount() > Decimal::from(MAX_RATE_PER_PIT) {
            return Err(PlantationError::validation(
                "base_rate_per_pit",
                format!("rate per pit must not exceed {}", MAX_RATE_PER_PIT),
            ));
        }
        Ok(Self { base_rate_per_pit })
    }

    pub fn base_rate_per_pit(&self) -> Money {
        self.base_rate_per_pit
    }

    pub fn currency(&self) -> Currency {
        self.base_rate_per_pit.currency()
    }

    /// Computes the incentive for a record
    ///
    /// * without survival data: `pit_count × rate`
    /// * with survival data: `round(pit_count × survival_rate / 100 × rate)`
    ///
    /// `survival_rate` is a percentage; values outside `[0, 100]` are
    /// clamped to that range.
    pub fn incentive(&self, pit_count: u32, survival_rate: Option<Decimal>) -> Money {
        let flat = self.base_rate_per_pit.amount() * Decimal::from(pit_count);
        match survival_rate {
            None => Money::new(flat, self.currency()),
            Some(rate) => {
                let rate = rate.clamp(Decimal::ZERO, dec!(100));
                let weighted = (flat * rate / dec!(100))
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
                Money::new(weighted, self.currency())
            }
        }
    }
}

impl Default for IncentivePolicy {
    fn default() -> Self {
        Self {
            base_rate_per_pit: Money::from_units(DEFAULT_RATE_PER_PIT, Currency::INR),
        }
    }
}
