//! Position state account
//!
//! One account per user per market. A single signed base principal
//! records either a supply (positive) or a borrow (negative); collateral
//! balances are raw token amounts indexed by registry offset.

use anchor_lang::prelude::*;
use crate::constants::{MAX_ASSETS, PROGRAM_SEED_PREFIX};

/// User position in a specific market
///
/// PDA Seeds: [PROGRAM_SEED_PREFIX, b"comet_position", market, owner]
#[account]
#[derive(Debug)]
pub struct Position {
    /// PDA bump seed
    pub bump: u8,

    /// Market this position belongs to
    pub market: Pubkey,

    /// Position owner
    pub owner: Pubkey,

    /// Signed base principal: > 0 supplying, < 0 borrowing
    pub base_principal: i128,

    /// Collateral per registry offset (raw tokens, earns no interest)
    pub collateral: [u128; MAX_ASSETS],

    /// Reserved for future use
    pub reserved: [u8; 32],
}

impl Position {
    pub const SEED: &'static [u8] = b"comet_position";

    pub fn space() -> usize {
        8 +                 // discriminator
        1 +                 // bump
        32 +                // market
        32 +                // owner
        16 +                // base_principal
        16 * MAX_ASSETS +   // collateral
        32                  // reserved
    }

    pub fn new(market: Pubkey, owner: Pubkey, bump: u8) -> Self {
        Self {
            bump,
            market,
            owner,
            base_principal: 0,
            collateral: [0; MAX_ASSETS],
            reserved: [0; 32],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.base_principal == 0 && !self.has_collateral()
    }

    pub fn has_debt(&self) -> bool {
        self.base_principal < 0
    }

    pub fn has_collateral(&self) -> bool {
        self.collateral.iter().any(|balance| *balance > 0)
    }

    /// Supply principal, 0 when borrowing
    pub fn supply_principal(&self) -> u128 {
        if self.base_principal > 0 {
            self.base_principal.unsigned_abs()
        } else {
            0
        }
    }

    /// Borrow principal magnitude, 0 when supplying
    pub fn borrow_principal(&self) -> u128 {
        if self.base_principal < 0 {
            self.base_principal.unsigned_abs()
        } else {
            0
        }
    }
}

/// Derive position PDA
pub fn derive_position(program_id: &Pubkey, market: &Pubkey, owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            PROGRAM_SEED_PREFIX,
            Position::SEED,
            market.as_ref(),
            owner.as_ref(),
        ],
        program_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_sides() {
        let mut position = Position::new(Pubkey::new_unique(), Pubkey::new_unique(), 255);
        assert!(position.is_empty());
        assert!(!position.has_debt());

        position.base_principal = 500;
        assert_eq!(position.supply_principal(), 500);
        assert_eq!(position.borrow_principal(), 0);

        position.base_principal = -700;
        assert!(position.has_debt());
        assert_eq!(position.supply_principal(), 0);
        assert_eq!(position.borrow_principal(), 700);
    }

    #[test]
    fn test_collateral_makes_position_non_empty() {
        let mut position = Position::new(Pubkey::new_unique(), Pubkey::new_unique(), 255);
        position.collateral[3] = 1;
        assert!(position.has_collateral());
        assert!(!position.is_empty());
    }

    #[test]
    fn test_position_space_covers_serialized_size() {
        let position = Position::new(Pubkey::new_unique(), Pubkey::new_unique(), 255);
        let mut serialized = Vec::new();
        position.try_serialize(&mut serialized).unwrap();
        assert_eq!(serialized.len(), Position::space());
    }
}
