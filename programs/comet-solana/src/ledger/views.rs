//! Read-only queries
//!
//! Balances and rates are projected to `now` on a copy of the market, so
//! a view between accruals reports what the next accrual would commit.

use anchor_lang::prelude::*;
use crate::interfaces::PriceOracle;
use crate::math::{
    accrue_interest_on_market, checked_add_signed, checked_sub_signed, present_borrow,
    present_supply, safe_u128_to_i128,
};
use crate::state::{Market, Position};
use super::health;

/// Copy of the market accrued to `now`
pub fn snapshot(market: &Market, now: i64) -> Result<Market> {
    let mut projected = market.clone();
    accrue_interest_on_market(&mut projected, now)?;
    Ok(projected)
}

pub fn get_utilization(market: &Market, now: i64) -> Result<u128> {
    snapshot(market, now)?.utilization()
}

/// Per-second supply rate the market's model gives at `utilization`
pub fn get_supply_rate(market: &Market, utilization: u128) -> Result<u128> {
    market.rate_model.supply_rate(utilization)
}

/// Per-second borrow rate the market's model gives at `utilization`
pub fn get_borrow_rate(market: &Market, utilization: u128) -> Result<u128> {
    market.rate_model.borrow_rate(utilization)
}

pub fn total_supply(market: &Market, now: i64) -> Result<u128> {
    snapshot(market, now)?.total_supply()
}

pub fn total_borrow(market: &Market, now: i64) -> Result<u128> {
    snapshot(market, now)?.total_borrow()
}

/// Present base supply of the position (0 when borrowing)
pub fn balance_of(market: &Market, position: &Position, now: i64) -> Result<u128> {
    let projected = snapshot(market, now)?;
    present_supply(position.supply_principal(), projected.base_supply_index)
}

/// Present base debt of the position (0 when supplying)
pub fn borrow_balance_of(market: &Market, position: &Position, now: i64) -> Result<u128> {
    let projected = snapshot(market, now)?;
    present_borrow(position.borrow_principal(), projected.base_borrow_index)
}

pub fn collateral_balance_of(market: &Market, position: &Position, asset: &Pubkey) -> Result<u128> {
    let offset = market.asset_offset(asset)?;
    Ok(position.collateral[offset])
}

pub fn is_borrow_collateralized(
    market: &Market,
    position: &Position,
    oracle: &impl PriceOracle,
    now: i64,
) -> Result<bool> {
    health::is_borrow_collateralized(&snapshot(market, now)?, position, oracle)
}

pub fn is_liquidatable(
    market: &Market,
    position: &Position,
    oracle: &impl PriceOracle,
    now: i64,
) -> Result<bool> {
    health::is_liquidatable(&snapshot(market, now)?, position, oracle)
}

pub fn health_factor(
    market: &Market,
    position: &Position,
    oracle: &impl PriceOracle,
    now: i64,
) -> Result<Option<u128>> {
    health::health_factor(&snapshot(market, now)?, position, oracle)
}

pub fn borrow_capacity(
    market: &Market,
    position: &Position,
    oracle: &impl PriceOracle,
    now: i64,
) -> Result<u128> {
    health::borrow_capacity(&snapshot(market, now)?, position, oracle)
}

/// Protocol reserves in base units: cash held minus what suppliers are owed
///
/// Negative when absorbed shortfall exceeds accumulated interest.
pub fn get_reserves(market: &Market, vault_balance: u64, now: i64) -> Result<i128> {
    let projected = snapshot(market, now)?;
    let owed = safe_u128_to_i128(projected.total_supply()?)?;
    let lent = safe_u128_to_i128(projected.total_borrow()?)?;
    checked_sub_signed(checked_add_signed(vault_balance as i128, lent)?, owed)
}
