//! Collateral balance changes

use anchor_lang::prelude::*;
use crate::errors::CometError;
use crate::math::{checked_add, checked_sub};
use crate::state::{Market, Position};

/// Apply a signed collateral amount for `asset`; returns the new balance
///
/// Deposits are bounded by the asset's supply cap across the market;
/// withdrawals by the position's balance.
pub fn apply_collateral_delta(
    market: &mut Market,
    position: &mut Position,
    asset: &Pubkey,
    delta: i128,
) -> Result<u128> {
    let offset = market.asset_offset(asset)?;
    let amount = delta.unsigned_abs();
    let balance = position.collateral[offset];
    let total = market.totals_collateral[offset];

    let (new_balance, new_total) = if delta >= 0 {
        let new_total = checked_add(total, amount)?;
        require!(
            new_total <= market.assets[offset].supply_cap,
            CometError::CapExceeded
        );
        (checked_add(balance, amount)?, new_total)
    } else {
        require!(balance >= amount, CometError::InsufficientBalance);
        (checked_sub(balance, amount)?, checked_sub(total, amount)?)
    };

    position.collateral[offset] = new_balance;
    market.totals_collateral[offset] = new_total;

    Ok(new_balance)
}
