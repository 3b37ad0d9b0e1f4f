//! Index accrual and principal/present conversions
//!
//! Interest is simple per accrual step: each index grows by
//! `index * rate * elapsed`, and compounding happens across steps.
//! Balances are stored as principal; present value = principal * index.

use anchor_lang::prelude::*;
use crate::constants::BASE_INDEX_SCALE;
use crate::errors::CometError;
use crate::state::Market;
use super::fixed::{mul_div_down, mul_div_up, mul_factor_down};
use super::safe_math::{checked_add, checked_mul};

/// Result of interest accrual
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccrualResult {
    /// Seconds since the previous accrual
    pub elapsed: u64,
    /// Utilization the rates were evaluated at (FACTOR-scaled)
    pub utilization: u128,
    pub supply_index: u128,
    pub borrow_index: u128,
}

fn grow_index(index: u128, rate_per_second: u128, elapsed: u128) -> Result<u128> {
    let growth = mul_factor_down(index, checked_mul(rate_per_second, elapsed)?)?;
    checked_add(index, growth)
}

/// Indices as they would be after accruing to `now`, without writing
pub fn accrued_indices(market: &Market, now: i64) -> Result<AccrualResult> {
    require!(now >= market.last_accrual_time, CometError::InvalidTimeOrder);

    let elapsed = (now - market.last_accrual_time) as u64;
    let utilization = market.utilization()?;

    if elapsed == 0 {
        return Ok(AccrualResult {
            elapsed,
            utilization,
            supply_index: market.base_supply_index,
            borrow_index: market.base_borrow_index,
        });
    }

    let supply_rate = market.rate_model.supply_rate(utilization)?;
    let borrow_rate = market.rate_model.borrow_rate(utilization)?;

    Ok(AccrualResult {
        elapsed,
        utilization,
        supply_index: grow_index(market.base_supply_index, supply_rate, elapsed as u128)?,
        borrow_index: grow_index(market.base_borrow_index, borrow_rate, elapsed as u128)?,
    })
}

/// Accrue interest on a market
///
/// MUST be called before any operation that reads or writes principals.
/// Idempotent within one timestamp; fails if `now` precedes the last
/// accrual.
pub fn accrue_interest_on_market(market: &mut Market, now: i64) -> Result<AccrualResult> {
    let result = accrued_indices(market, now)?;

    market.base_supply_index = result.supply_index;
    market.base_borrow_index = result.borrow_index;
    market.last_accrual_time = now;

    Ok(result)
}

/// Present value of a supply principal, rounded down
pub fn present_supply(principal: u128, supply_index: u128) -> Result<u128> {
    mul_div_down(principal, supply_index, BASE_INDEX_SCALE)
}

/// Present value of a borrow principal magnitude, rounded up
pub fn present_borrow(principal: u128, borrow_index: u128) -> Result<u128> {
    mul_div_up(principal, borrow_index, BASE_INDEX_SCALE)
}

/// Supply principal credited for a deposit, rounded down
pub fn principal_supply_down(amount: u128, supply_index: u128) -> Result<u128> {
    mul_div_down(amount, BASE_INDEX_SCALE, supply_index)
}

/// Supply principal removed for a withdrawal, rounded up
pub fn principal_supply_up(amount: u128, supply_index: u128) -> Result<u128> {
    mul_div_up(amount, BASE_INDEX_SCALE, supply_index)
}

/// Borrow principal added for a new borrow, rounded up
pub fn principal_borrow_up(amount: u128, borrow_index: u128) -> Result<u128> {
    mul_div_up(amount, BASE_INDEX_SCALE, borrow_index)
}

/// Borrow principal extinguished by a repayment, rounded down
pub fn principal_borrow_down(amount: u128, borrow_index: u128) -> Result<u128> {
    mul_div_down(amount, BASE_INDEX_SCALE, borrow_index)
}
