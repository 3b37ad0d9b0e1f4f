//! Interest Rate Model
//!
//! Kinked borrow curve configured in yearly terms, evaluated as
//! per-second rates (scaled 1e18 = FACTOR_SCALE). Callers multiply by
//! elapsed seconds; nothing in here knows about time.
//!
//! Example: 5% APR ≈ 1.585e-9 per second = 1_585_489_599 when scaled

use anchor_lang::prelude::*;
use crate::constants::{FACTOR_SCALE, SECONDS_PER_YEAR, MAX_BORROW_RATE_PER_SECOND};
use crate::errors::CometError;
use crate::math::{checked_add, checked_sub, div_factor_down, mul_factor_down};

/// Linear (kinked) rate model stored inline in the market
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InterestRateModel {
    /// Borrow rate at 0% utilization (yearly, FACTOR-scaled)
    pub base_rate: u128,

    /// Slope below kink (yearly, FACTOR-scaled)
    pub slope_low: u128,

    /// Slope above kink (yearly, FACTOR-scaled)
    pub slope_high: u128,

    /// Utilization kink point (FACTOR-scaled, e.g. 0.8e18 = 80%)
    pub kink: u128,

    /// Share of borrow interest withheld from suppliers (FACTOR-scaled)
    pub reserve_factor: u128,
}

impl InterestRateModel {
    pub const SIZE: usize = 16 * 5;

    pub fn validate(&self) -> Result<()> {
        require!(
            self.kink > 0 && self.kink <= FACTOR_SCALE,
            CometError::InvalidRateModel
        );
        require!(self.reserve_factor <= FACTOR_SCALE, CometError::InvalidRateModel);
        require!(
            self.slope_high >= self.slope_low,
            CometError::InvalidRateModel
        );
        Ok(())
    }

    /// Yearly borrow rate on the kinked curve
    fn yearly_borrow_rate(&self, utilization: u128) -> Result<u128> {
        if utilization <= self.kink {
            // Below kink: base + slope_low * utilization
            checked_add(self.base_rate, mul_factor_down(utilization, self.slope_low)?)
        } else {
            // Above kink: rate_at_kink + slope_high * (utilization - kink)
            let rate_at_kink = checked_add(
                self.base_rate,
                mul_factor_down(self.kink, self.slope_low)?,
            )?;
            let excess = utilization.saturating_sub(self.kink);
            checked_add(rate_at_kink, mul_factor_down(excess, self.slope_high)?)
        }
    }

    /// Borrow rate per second at the given utilization
    pub fn borrow_rate(&self, utilization: u128) -> Result<u128> {
        let per_second = self.yearly_borrow_rate(utilization)? / SECONDS_PER_YEAR;
        Ok(std::cmp::min(per_second, MAX_BORROW_RATE_PER_SECOND))
    }

    /// Supply rate per second at the given utilization
    ///
    /// borrow_rate * utilization * (1 - reserve_factor); the withheld part
    /// stays in the pool as implicit reserves.
    pub fn supply_rate(&self, utilization: u128) -> Result<u128> {
        let gross = mul_factor_down(self.borrow_rate(utilization)?, utilization)?;
        mul_factor_down(gross, checked_sub(FACTOR_SCALE, self.reserve_factor)?)
    }
}

/// Utilization = borrow / supply (FACTOR-scaled), 0 when nothing is supplied
pub fn utilization(total_supply: u128, total_borrow: u128) -> Result<u128> {
    if total_supply == 0 {
        return Ok(0);
    }
    div_factor_down(total_borrow, total_supply)
}

// Example configurations:
//
// STABLE (USDT base):
//   base_rate:      0.01e18  (1% base)
//   slope_low:      0.04e18  (4% slope below kink)
//   slope_high:     0.75e18  (75% slope above kink)
//   kink:           0.80e18  (80% target utilization)
//   reserve_factor: 0.10e18  (10% withheld)
