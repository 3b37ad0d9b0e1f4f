//! Supply and withdraw
//!
//! Each operation accrues the market (kept even if the operation fails),
//! applies its changes to staged copies, validates the staged result, and
//! only then writes market and position back.

use anchor_lang::prelude::*;
use crate::errors::CometError;
use crate::interfaces::PriceOracle;
use crate::math::{accrue_interest_on_market, present_borrow, AccrualResult};
use crate::state::{Market, Position};
use super::base::{apply_base_delta, BaseChange};
use super::collateral::apply_collateral_delta;
use super::health::is_borrow_collateralized;

/// What a supply or withdraw moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Base(BaseChange),
    Collateral { offset: u8, balance: u128 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub accrual: AccrualResult,
    pub movement: Movement,
}

/// Supply `amount` of `asset` into the position
///
/// Base repays debt before supplying; collateral is bounded by its cap.
pub fn supply(
    market: &mut Market,
    position: &mut Position,
    asset: &Pubkey,
    amount: u64,
    now: i64,
) -> Result<Outcome> {
    let accrual = accrue_interest_on_market(market, now)?;
    require!(amount > 0, CometError::ZeroAmount);

    let mut staged_market = market.clone();
    let mut staged_position = position.clone();

    let movement = if market.is_base(asset) {
        Movement::Base(apply_base_delta(
            &mut staged_market,
            &mut staged_position,
            amount as i128,
        )?)
    } else {
        let balance = apply_collateral_delta(
            &mut staged_market,
            &mut staged_position,
            asset,
            amount as i128,
        )?;
        Movement::Collateral {
            offset: market.asset_offset(asset)? as u8,
            balance,
        }
    };

    *market = staged_market;
    *position = staged_position;

    Ok(Outcome { accrual, movement })
}

/// Withdraw `amount` of `asset` from the position
///
/// Base withdraws supply and then borrows; any resulting debt must meet
/// the market minimum and be borrow-collateralized. Collateral
/// withdrawals must leave the position borrow-collateralized.
pub fn withdraw(
    market: &mut Market,
    position: &mut Position,
    asset: &Pubkey,
    amount: u64,
    oracle: &impl PriceOracle,
    now: i64,
) -> Result<Outcome> {
    let accrual = accrue_interest_on_market(market, now)?;
    require!(amount > 0, CometError::ZeroAmount);

    let mut staged_market = market.clone();
    let mut staged_position = position.clone();

    let movement = if market.is_base(asset) {
        require!(
            amount as u128 <= market.available_liquidity()?,
            CometError::InsufficientLiquidity
        );

        let change = apply_base_delta(
            &mut staged_market,
            &mut staged_position,
            -(amount as i128),
        )?;

        if staged_position.has_debt() {
            let debt = present_borrow(
                staged_position.borrow_principal(),
                staged_market.base_borrow_index,
            )?;
            require!(
                debt >= staged_market.base_borrow_min,
                CometError::BelowMinimumBorrow
            );
        }
        Movement::Base(change)
    } else {
        let balance = apply_collateral_delta(
            &mut staged_market,
            &mut staged_position,
            asset,
            -(amount as i128),
        )?;
        Movement::Collateral {
            offset: market.asset_offset(asset)? as u8,
            balance,
        }
    };

    require!(
        is_borrow_collateralized(&staged_market, &staged_position, oracle)?,
        CometError::Undercollateralized
    );

    *market = staged_market;
    *position = staged_position;

    Ok(Outcome { accrual, movement })
}
