//! Absorb: protocol-side liquidation
//!
//! The protocol takes over every collateral balance of an underwater
//! position, credits it at `price * liquidation_factor`, and nets that
//! against the debt. Surplus becomes base supply for the absorbed account;
//! a deficit is written off against reserves and recorded as shortfall.

use anchor_lang::prelude::*;
use crate::constants::MAX_ASSETS;
use crate::errors::CometError;
use crate::interfaces::PriceOracle;
use crate::math::{
    accrue_interest_on_market, checked_add, checked_sub, present_borrow, safe_u128_to_i128,
    token_amount_down, usd_value_up,
};
use crate::state::{LiquidatorPoints, Market, Position};
use super::base::apply_base_delta;
use super::health::{is_liquidatable, weighted_collateral_value, CollateralFactor};

/// Summary of one absorption
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbsorbResult {
    /// Present base debt cleared
    pub debt_absorbed: u128,
    /// USD value (PRICE_SCALE) of the cleared debt
    pub debt_value: u128,
    /// Seized collateral credited at the liquidation factor (USD)
    pub collateral_value: u128,
    /// Base credited for the seized collateral
    pub base_credited: u128,
    /// Debt left uncovered by collateral
    pub shortfall: u128,
    /// Collateral seized per registry offset
    pub seized: [u128; MAX_ASSETS],
    /// Number of non-zero balances seized
    pub assets_seized: u64,
    pub new_principal: i128,
}

/// Absorb a liquidatable position
///
/// Accrues first (committed even if the position turns out healthy), then
/// stages every change and commits market, position and points together.
pub fn absorb_position(
    market: &mut Market,
    position: &mut Position,
    points: &mut LiquidatorPoints,
    oracle: &impl PriceOracle,
    now: i64,
) -> Result<AbsorbResult> {
    accrue_interest_on_market(market, now)?;
    require!(
        is_liquidatable(market, position, oracle)?,
        CometError::NotLiquidatable
    );

    let mut staged_market = market.clone();
    let mut staged_position = position.clone();
    let mut staged_points = points.clone();
    let mut result = AbsorbResult::default();

    // Seize collateral
    for asset in market.listed_assets() {
        let offset = asset.offset as usize;
        let balance = staged_position.collateral[offset];
        if balance == 0 {
            continue;
        }

        let value = weighted_collateral_value(asset, balance, oracle, CollateralFactor::Liquidation)?;
        result.collateral_value = checked_add(result.collateral_value, value)?;

        staged_position.collateral[offset] = 0;
        staged_market.totals_collateral[offset] =
            checked_sub(staged_market.totals_collateral[offset], balance)?;
        staged_market.collateral_reserves[offset] =
            checked_add(staged_market.collateral_reserves[offset], balance)?;

        result.seized[offset] = balance;
        result.assets_seized += 1;
    }

    // Net against debt
    let base_price = oracle.get_price(&market.base_price_feed)?;
    result.base_credited = token_amount_down(result.collateral_value, base_price, market.base_decimals)?;
    result.debt_absorbed = present_borrow(position.borrow_principal(), market.base_borrow_index)?;
    result.debt_value = usd_value_up(result.debt_absorbed, base_price, market.base_decimals)?;

    // Reserves cover whatever the collateral does not
    let credit = result.base_credited.max(result.debt_absorbed);
    result.shortfall = result.debt_absorbed.saturating_sub(result.base_credited);
    let change = apply_base_delta(
        &mut staged_market,
        &mut staged_position,
        safe_u128_to_i128(credit)?,
    )?;
    result.new_principal = change.new_principal;

    staged_market.absorbed_shortfall =
        checked_add(staged_market.absorbed_shortfall, result.shortfall)?;
    staged_points.record_absorb(result.assets_seized, result.debt_value)?;

    *market = staged_market;
    *position = staged_position;
    *points = staged_points;

    Ok(result)
}
