//! Human-readable market and position summaries
//!
//! Fixed-point values are converted to `Decimal` for logging only; nothing
//! here feeds back into accounting.

use anchor_lang::prelude::*;
use rust_decimal::Decimal;
use crate::constants::SECONDS_PER_YEAR;
use crate::errors::CometError;
use crate::interfaces::PriceOracle;
use crate::math::{checked_mul, safe_u128_to_i128};
use crate::state::{Market, Position};
use super::views;

const FACTOR_DECIMALS: u32 = 18;

/// Fixed-point integer with `decimals` fractional digits as a Decimal
pub fn to_decimal(value: u128, decimals: u32) -> Result<Decimal> {
    Decimal::try_from_i128_with_scale(safe_u128_to_i128(value)?, decimals)
        .map_err(|_| CometError::MathOverflow.into())
}

/// FACTOR-scaled value as a percentage, two decimal places
pub fn to_percent(factor: u128) -> Result<Decimal> {
    let percent = to_decimal(factor, FACTOR_DECIMALS)?
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or(CometError::MathOverflow)?;
    Ok(percent.round_dp(2))
}

/// Per-second rate as a yearly percentage
pub fn to_apr_percent(rate_per_second: u128) -> Result<Decimal> {
    to_percent(checked_mul(rate_per_second, SECONDS_PER_YEAR)?)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReport {
    pub mint: Pubkey,
    pub borrow_collateral_factor: Decimal,
    pub liquidate_collateral_factor: Decimal,
    pub liquidation_factor: Decimal,
    pub total_collateral: Decimal,
    /// None for an uncapped asset (`u128::MAX`)
    pub supply_cap: Option<Decimal>,
    pub reserves: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolReport {
    pub utilization: Decimal,
    pub supply_apr: Decimal,
    pub borrow_apr: Decimal,
    pub total_supply: Decimal,
    pub total_borrow: Decimal,
    pub absorbed_shortfall: Decimal,
    pub assets: Vec<AssetReport>,
}

impl PoolReport {
    pub fn build(market: &Market, now: i64) -> Result<Self> {
        let projected = views::snapshot(market, now)?;
        let utilization = projected.utilization()?;
        let base_decimals = projected.base_decimals as u32;

        let assets = projected
            .listed_assets()
            .iter()
            .map(|asset| {
                let offset = asset.offset as usize;
                let decimals = asset.decimals as u32;
                Ok(AssetReport {
                    mint: asset.mint,
                    borrow_collateral_factor: to_percent(asset.borrow_collateral_factor as u128)?,
                    liquidate_collateral_factor: to_percent(asset.liquidate_collateral_factor as u128)?,
                    liquidation_factor: to_percent(asset.liquidation_factor as u128)?,
                    total_collateral: to_decimal(projected.totals_collateral[offset], decimals)?,
                    supply_cap: match asset.supply_cap {
                        u128::MAX => None,
                        cap => Some(to_decimal(cap, decimals)?),
                    },
                    reserves: to_decimal(projected.collateral_reserves[offset], decimals)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            utilization: to_percent(utilization)?,
            supply_apr: to_apr_percent(projected.rate_model.supply_rate(utilization)?)?,
            borrow_apr: to_apr_percent(projected.rate_model.borrow_rate(utilization)?)?,
            total_supply: to_decimal(projected.total_supply()?, base_decimals)?,
            total_borrow: to_decimal(projected.total_borrow()?, base_decimals)?,
            absorbed_shortfall: to_decimal(projected.absorbed_shortfall, base_decimals)?,
            assets,
        })
    }

    pub fn log(&self) {
        msg!("Utilization: {}%", self.utilization);
        msg!("Supply APR: {}% | Borrow APR: {}%", self.supply_apr, self.borrow_apr);
        msg!("Total supply: {} | Total borrow: {}", self.total_supply, self.total_borrow);
        msg!("Absorbed shortfall: {}", self.absorbed_shortfall);
        for asset in &self.assets {
            let cap = match asset.supply_cap {
                Some(cap) => cap.to_string(),
                None => "none".to_string(),
            };
            msg!(
                "Asset {}: CF {}% / {}% | LF {}% | collateral {} of cap {} | reserves {}",
                asset.mint,
                asset.borrow_collateral_factor,
                asset.liquidate_collateral_factor,
                asset.liquidation_factor,
                asset.total_collateral,
                cap,
                asset.reserves
            );
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionReport {
    pub supplied: Decimal,
    pub borrowed: Decimal,
    /// None when the position has no debt
    pub health_factor: Option<Decimal>,
    pub borrow_capacity: Decimal,
}

impl PositionReport {
    pub fn build(
        market: &Market,
        position: &Position,
        oracle: &impl PriceOracle,
        now: i64,
    ) -> Result<Self> {
        let base_decimals = market.base_decimals as u32;
        let health = views::health_factor(market, position, oracle, now)?
            .map(|factor| to_decimal(factor, FACTOR_DECIMALS).map(|d| d.round_dp(4)))
            .transpose()?;

        Ok(Self {
            supplied: to_decimal(views::balance_of(market, position, now)?, base_decimals)?,
            borrowed: to_decimal(views::borrow_balance_of(market, position, now)?, base_decimals)?,
            health_factor: health,
            borrow_capacity: to_decimal(
                views::borrow_capacity(market, position, oracle, now)?,
                base_decimals,
            )?,
        })
    }

    pub fn log(&self) {
        msg!("Supplied: {} | Borrowed: {}", self.supplied, self.borrowed);
        match self.health_factor {
            Some(health) => msg!("Health factor: {}", health),
            None => msg!("Health factor: no debt"),
        }
        msg!("Borrow capacity: {}", self.borrow_capacity);
    }
}
