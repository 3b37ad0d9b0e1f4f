//! Signed base balance changes
//!
//! A delta that crosses zero is applied as two steps: first the existing
//! side is paid down (exactly to zero if the amount covers it), then the
//! remainder opens the other side. Totals move by the principal each step
//! removed or added, so `sum(principals) == totals` holds by construction.

use anchor_lang::prelude::*;
use crate::math::{
    checked_add, checked_sub, checked_add_signed, checked_sub_signed, safe_u128_to_i128,
    present_borrow, present_supply,
    principal_borrow_down, principal_borrow_up, principal_supply_down, principal_supply_up,
};
use crate::state::{Market, Position};

/// Principal movements produced by one base delta
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseChange {
    pub old_principal: i128,
    pub new_principal: i128,
    /// Borrow principal extinguished
    pub repay_principal: u128,
    /// Supply principal created
    pub supply_principal: u128,
    /// Supply principal removed
    pub withdraw_principal: u128,
    /// Borrow principal created
    pub borrow_principal: u128,
    /// Present base amount repaid
    pub repaid: u128,
    /// Present base amount newly borrowed
    pub borrowed: u128,
}

/// Apply a signed base amount (present value) to a position
///
/// Positive deltas repay debt then supply; negative deltas withdraw supply
/// then borrow. Indices must already be accrued.
pub fn apply_base_delta(
    market: &mut Market,
    position: &mut Position,
    delta: i128,
) -> Result<BaseChange> {
    let amount = delta.unsigned_abs();
    let change = if delta >= 0 {
        credit(market, position.base_principal, amount)?
    } else {
        debit(market, position.base_principal, amount)?
    };

    let total_supply = checked_sub(
        checked_add(market.total_supply_base, change.supply_principal)?,
        change.withdraw_principal,
    )?;
    let total_borrow = checked_sub(
        checked_add(market.total_borrow_base, change.borrow_principal)?,
        change.repay_principal,
    )?;

    market.total_supply_base = total_supply;
    market.total_borrow_base = total_borrow;
    position.base_principal = change.new_principal;

    Ok(change)
}

fn credit(market: &Market, principal: i128, amount: u128) -> Result<BaseChange> {
    let mut change = BaseChange {
        old_principal: principal,
        new_principal: principal,
        ..Default::default()
    };
    let mut remaining = amount;

    // Repay
    if principal < 0 {
        let debt_principal = principal.unsigned_abs();
        let debt = present_borrow(debt_principal, market.base_borrow_index)?;

        if remaining >= debt {
            change.repay_principal = debt_principal;
            change.repaid = debt;
            change.new_principal = 0;
            remaining = checked_sub(remaining, debt)?;
        } else {
            let repay = principal_borrow_down(remaining, market.base_borrow_index)?
                .min(debt_principal);
            change.repay_principal = repay;
            change.repaid = remaining;
            change.new_principal = checked_add_signed(principal, safe_u128_to_i128(repay)?)?;
            remaining = 0;
        }
    }

    // Supply
    if remaining > 0 {
        let supplied = principal_supply_down(remaining, market.base_supply_index)?;
        change.supply_principal = supplied;
        change.new_principal =
            checked_add_signed(change.new_principal, safe_u128_to_i128(supplied)?)?;
    }

    Ok(change)
}

fn debit(market: &Market, principal: i128, amount: u128) -> Result<BaseChange> {
    let mut change = BaseChange {
        old_principal: principal,
        new_principal: principal,
        ..Default::default()
    };
    let mut remaining = amount;

    // Withdraw
    if principal > 0 {
        let supply_principal = principal.unsigned_abs();
        let balance = present_supply(supply_principal, market.base_supply_index)?;

        if remaining >= balance {
            change.withdraw_principal = supply_principal;
            change.new_principal = 0;
            remaining = checked_sub(remaining, balance)?;
        } else {
            let withdrawn = principal_supply_up(remaining, market.base_supply_index)?
                .min(supply_principal);
            change.withdraw_principal = withdrawn;
            change.new_principal =
                checked_sub_signed(principal, safe_u128_to_i128(withdrawn)?)?;
            remaining = 0;
        }
    }

    // Borrow
    if remaining > 0 {
        let borrowed = principal_borrow_up(remaining, market.base_borrow_index)?;
        change.borrow_principal = borrowed;
        change.borrowed = remaining;
        change.new_principal =
            checked_sub_signed(change.new_principal, safe_u128_to_i128(borrowed)?)?;
    }

    Ok(change)
}
