//! Fixed-point arithmetic on u128
//!
//! Factors and rates are FACTOR_SCALE (1e18) fixed-point, prices are
//! PRICE_SCALE (1e8) fixed-point and token amounts are in the token's own
//! decimals. Every helper states its rounding direction in its name.

use anchor_lang::prelude::*;
use crate::errors::CometError;
use crate::constants::{FACTOR_SCALE, MAX_ASSET_DECIMALS};
use super::safe_math::checked_mul;

/// Multiply then divide, rounding DOWN
/// Order: (a * b) / c
pub fn mul_div_down(a: u128, b: u128, c: u128) -> Result<u128> {
    if c == 0 {
        return Err(CometError::DivisionByZero.into());
    }

    if a == 0 || b == 0 {
        return Ok(0);
    }

    let product = checked_mul(a, b)?;
    Ok(product / c)
}

/// Multiply then divide, rounding UP
/// Formula: (a * b + c - 1) / c
pub fn mul_div_up(a: u128, b: u128, c: u128) -> Result<u128> {
    if c == 0 {
        return Err(CometError::DivisionByZero.into());
    }

    if a == 0 || b == 0 {
        return Ok(0);
    }

    let product = checked_mul(a, b)?;
    let result = product
        .checked_add(c - 1)
        .ok_or(CometError::MathOverflow)?
        / c;

    Ok(result)
}

/// Factor multiplication (a * b / FACTOR_SCALE), rounded down
#[inline]
pub fn mul_factor_down(a: u128, b: u128) -> Result<u128> {
    mul_div_down(a, b, FACTOR_SCALE)
}

/// Factor division (a * FACTOR_SCALE / b), rounded down
#[inline]
pub fn div_factor_down(a: u128, b: u128) -> Result<u128> {
    mul_div_down(a, FACTOR_SCALE, b)
}

/// 10^decimals for a token scale
pub fn decimals_scale(decimals: u8) -> Result<u128> {
    require!(decimals <= MAX_ASSET_DECIMALS, CometError::InvalidAssetConfig);
    Ok(10u128.pow(decimals as u32))
}

/// USD value of a token amount at PRICE_SCALE, rounded down
///
/// value = amount * price / 10^decimals
pub fn usd_value_down(amount: u128, price: u128, decimals: u8) -> Result<u128> {
    mul_div_down(amount, price, decimals_scale(decimals)?)
}

/// USD value of a token amount at PRICE_SCALE, rounded up
pub fn usd_value_up(amount: u128, price: u128, decimals: u8) -> Result<u128> {
    mul_div_up(amount, price, decimals_scale(decimals)?)
}

/// Token amount worth `value` USD (PRICE_SCALE), rounded down
///
/// amount = value * 10^decimals / price
pub fn token_amount_down(value: u128, price: u128, decimals: u8) -> Result<u128> {
    mul_div_down(value, decimals_scale(decimals)?, price)
}
