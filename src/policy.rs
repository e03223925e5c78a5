// src/policy.rs
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dollars per point when the day's spend is above the cutoff.
pub const REWARDS_RATIO_ABOVE: u32 = 17;
/// Dollars per point otherwise.
pub const REWARDS_RATIO_BELOW: u32 = 18;
/// Daily spend that must be exceeded to earn at the better rate.
pub const REWARDS_CUTOFF: i64 = 250;

fn default_ratio_above() -> u32 {
    REWARDS_RATIO_ABOVE
}

fn default_ratio_below() -> u32 {
    REWARDS_RATIO_BELOW
}

fn default_cutoff() -> Decimal {
    Decimal::from(REWARDS_CUTOFF)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("{0} must be > 0")]
    ZeroRatio(&'static str),
    #[error("cutoff must be >= 0, got {0}")]
    NegativeCutoff(Decimal),
}

/// End-of-day accrual tiers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RewardsPolicy {
    #[serde(default = "default_ratio_above")]
    pub ratio_above: u32,
    #[serde(default = "default_ratio_below")]
    pub ratio_below: u32,
    #[serde(default = "default_cutoff")]
    pub cutoff: Decimal,
}

impl Default for RewardsPolicy {
    fn default() -> Self {
        RewardsPolicy {
            ratio_above: REWARDS_RATIO_ABOVE,
            ratio_below: REWARDS_RATIO_BELOW,
            cutoff: default_cutoff(),
        }
    }
}

impl RewardsPolicy {
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.ratio_above == 0 {
            return Err(PolicyError::ZeroRatio("ratio_above"));
        }
        if self.ratio_below == 0 {
            return Err(PolicyError::ZeroRatio("ratio_below"));
        }
        if self.cutoff < Decimal::ZERO {
            return Err(PolicyError::NegativeCutoff(self.cutoff));
        }
        Ok(())
    }

    /// Dollars per point for a customer's total spend over one day.
    pub fn rate_for(&self, amount: Decimal) -> u32 {
        if amount > self.cutoff {
            self.ratio_above
        } else {
            self.ratio_below
        }
    }

    /// Points earned for one day's spend: floor(amount / rate).
    pub fn points_for(&self, amount: Decimal) -> Decimal {
        whole_multiples(amount, Decimal::from(self.rate_for(amount)))
    }
}

/// Largest integer `q` with `q * rate <= amount`, for non-negative `amount`.
///
/// Decimal division rounds at 28 significant digits, so the quotient is
/// nudged back onto the exact floor afterwards.
fn whole_multiples(amount: Decimal, rate: Decimal) -> Decimal {
    if amount <= Decimal::ZERO || rate <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let mut q = (amount / rate).floor();
    if q * rate > amount {
        q -= Decimal::ONE;
    } else if (q + Decimal::ONE) * rate <= amount {
        q += Decimal::ONE;
    }
    q
}
