//! Health evaluation
//!
//! Values are USD at PRICE_SCALE. Collateral is valued rounding down and
//! debt rounding up, so rounding never helps the borrower. Results use
//! the market's stored indices; accrue (or project) first.

use anchor_lang::prelude::*;
use crate::interfaces::PriceOracle;
use crate::math::{
    checked_add, checked_sub, div_factor_down, mul_factor_down, present_borrow,
    token_amount_down, usd_value_down, usd_value_up,
};
use crate::state::{AssetConfig, Market, Position};

/// Which collateral factor weights the collateral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollateralFactor {
    Borrow,
    Liquidate,
    Liquidation,
}

impl CollateralFactor {
    fn of(&self, asset: &AssetConfig) -> u128 {
        match self {
            CollateralFactor::Borrow => asset.borrow_collateral_factor as u128,
            CollateralFactor::Liquidate => asset.liquidate_collateral_factor as u128,
            CollateralFactor::Liquidation => asset.liquidation_factor as u128,
        }
    }
}

/// USD value of one collateral balance weighted by `factor`
pub fn weighted_collateral_value(
    asset: &AssetConfig,
    balance: u128,
    oracle: &impl PriceOracle,
    factor: CollateralFactor,
) -> Result<u128> {
    let price = oracle.get_price(&asset.price_feed)?;
    let value = usd_value_down(balance, price, asset.decimals)?;
    mul_factor_down(value, factor.of(asset))
}

/// Sum of the position's weighted collateral values
pub fn collateral_value(
    market: &Market,
    position: &Position,
    oracle: &impl PriceOracle,
    factor: CollateralFactor,
) -> Result<u128> {
    let mut total = 0u128;
    for asset in market.listed_assets() {
        let balance = position.collateral[asset.offset as usize];
        if balance == 0 {
            continue;
        }
        let value = weighted_collateral_value(asset, balance, oracle, factor)?;
        total = checked_add(total, value)?;
    }
    Ok(total)
}

/// USD value of the position's debt, rounded up
pub fn debt_value(market: &Market, position: &Position, oracle: &impl PriceOracle) -> Result<u128> {
    let debt = present_borrow(position.borrow_principal(), market.base_borrow_index)?;
    if debt == 0 {
        return Ok(0);
    }
    let price = oracle.get_price(&market.base_price_feed)?;
    usd_value_up(debt, price, market.base_decimals)
}

/// Debt covered by borrow-weighted collateral; debt-free is always true
pub fn is_borrow_collateralized(
    market: &Market,
    position: &Position,
    oracle: &impl PriceOracle,
) -> Result<bool> {
    if !position.has_debt() {
        return Ok(true);
    }
    let liquidity = collateral_value(market, position, oracle, CollateralFactor::Borrow)?;
    Ok(liquidity >= debt_value(market, position, oracle)?)
}

/// Debt exceeds liquidate-weighted collateral; debt-free is never liquidatable
pub fn is_liquidatable(
    market: &Market,
    position: &Position,
    oracle: &impl PriceOracle,
) -> Result<bool> {
    if !position.has_debt() {
        return Ok(false);
    }
    let liquidity = collateral_value(market, position, oracle, CollateralFactor::Liquidate)?;
    Ok(debt_value(market, position, oracle)? > liquidity)
}

/// Liquidate-weighted collateral / debt (FACTOR-scaled); None without debt
///
/// Below FACTOR_SCALE (1.0) the position is liquidatable.
pub fn health_factor(
    market: &Market,
    position: &Position,
    oracle: &impl PriceOracle,
) -> Result<Option<u128>> {
    let debt = debt_value(market, position, oracle)?;
    if debt == 0 {
        return Ok(None);
    }
    let liquidity = collateral_value(market, position, oracle, CollateralFactor::Liquidate)?;
    Ok(Some(div_factor_down(liquidity, debt)?))
}

/// Additional base the position could borrow (base units)
pub fn borrow_capacity(
    market: &Market,
    position: &Position,
    oracle: &impl PriceOracle,
) -> Result<u128> {
    let liquidity = collateral_value(market, position, oracle, CollateralFactor::Borrow)?;
    let debt = debt_value(market, position, oracle)?;
    if debt >= liquidity {
        return Ok(0);
    }
    let headroom = checked_sub(liquidity, debt)?;
    let price = oracle.get_price(&market.base_price_feed)?;
    token_amount_down(headroom, price, market.base_decimals)
}
