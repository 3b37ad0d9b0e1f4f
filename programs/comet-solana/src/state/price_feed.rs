//! Admin-set price feed
//!
//! Quotes one asset in USD at PRICE_SCALE (8 decimals). Markets reference
//! feeds by address; the program reads them from remaining accounts.

use anchor_lang::prelude::*;

#[account]
#[derive(Debug)]
pub struct PriceFeed {
    /// May update the price
    pub admin: Pubkey,

    /// USD price, PRICE_SCALE fixed-point
    pub price: u64,

    /// Last update timestamp
    pub updated_at: i64,
}

impl PriceFeed {
    pub fn space() -> usize {
        8 + 32 + 8 + 8
    }
}
