//! Liquidator bookkeeping
//!
//! Counters kept per liquidator per market; rewards are computed off-chain
//! from these.

use anchor_lang::prelude::*;
use crate::constants::PROGRAM_SEED_PREFIX;
use crate::errors::CometError;
use crate::math::checked_add;

/// PDA Seeds: [PROGRAM_SEED_PREFIX, b"comet_liquidator", market, liquidator]
#[account]
#[derive(Debug, Default)]
pub struct LiquidatorPoints {
    pub bump: u8,
    pub market: Pubkey,
    pub liquidator: Pubkey,

    /// Absorb calls made
    pub num_absorbs: u32,

    /// Collateral balances seized across all absorbs
    pub num_absorbed: u64,

    /// USD value (PRICE_SCALE) of debt absorbed
    pub value_absorbed: u128,
}

impl LiquidatorPoints {
    pub const SEED: &'static [u8] = b"comet_liquidator";

    pub fn space() -> usize {
        8 + 1 + 32 + 32 + 4 + 8 + 16
    }

    pub fn record_absorb(&mut self, assets_seized: u64, value: u128) -> Result<()> {
        self.num_absorbs = self
            .num_absorbs
            .checked_add(1)
            .ok_or(CometError::MathOverflow)?;
        self.num_absorbed = self
            .num_absorbed
            .checked_add(assets_seized)
            .ok_or(CometError::MathOverflow)?;
        self.value_absorbed = checked_add(self.value_absorbed, value)?;
        Ok(())
    }
}

pub fn derive_liquidator_points(
    program_id: &Pubkey,
    market: &Pubkey,
    liquidator: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            PROGRAM_SEED_PREFIX,
            LiquidatorPoints::SEED,
            market.as_ref(),
            liquidator.as_ref(),
        ],
        program_id,
    )
}
