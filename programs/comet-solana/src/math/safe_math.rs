//! Safe math utilities to prevent overflow/underflow
//!
//! Unsigned -> signed principal conversions go through safe_u128_to_i128().

use anchor_lang::prelude::*;
use crate::errors::CometError;

/// Safely convert an unsigned magnitude to a signed principal
#[inline]
pub fn safe_u128_to_i128(value: u128) -> Result<i128> {
    i128::try_from(value).map_err(|_| CometError::MathOverflow.into())
}

/// Checked addition with custom error
#[inline]
pub fn checked_add(a: u128, b: u128) -> Result<u128> {
    a.checked_add(b).ok_or_else(|| CometError::MathOverflow.into())
}

/// Checked subtraction with custom error
#[inline]
pub fn checked_sub(a: u128, b: u128) -> Result<u128> {
    a.checked_sub(b).ok_or_else(|| CometError::MathUnderflow.into())
}

/// Checked multiplication with custom error
#[inline]
pub fn checked_mul(a: u128, b: u128) -> Result<u128> {
    a.checked_mul(b).ok_or_else(|| CometError::MathOverflow.into())
}

/// Checked signed addition with custom error
#[inline]
pub fn checked_add_signed(a: i128, b: i128) -> Result<i128> {
    a.checked_add(b).ok_or_else(|| CometError::MathOverflow.into())
}

/// Checked signed subtraction with custom error
#[inline]
pub fn checked_sub_signed(a: i128, b: i128) -> Result<i128> {
    a.checked_sub(b).ok_or_else(|| CometError::MathUnderflow.into())
}
