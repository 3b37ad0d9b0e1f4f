//! Price oracle interface
//!
//! Prices are USD at PRICE_SCALE (1e8). The ledger only sees the
//! `PriceOracle` trait; on-chain the prices come from `PriceFeed` accounts
//! passed as remaining accounts.

use anchor_lang::prelude::*;
use crate::errors::CometError;
use crate::state::PriceFeed;

/// Source of USD prices keyed by price feed address
pub trait PriceOracle {
    /// Price for `feed` (PRICE_SCALE); zero prices are rejected
    fn get_price(&self, feed: &Pubkey) -> Result<u128>;
}

/// Prices loaded up front from a set of feed accounts
#[derive(Debug, Clone, Default)]
pub struct FeedPrices {
    entries: Vec<(Pubkey, u128)>,
}

impl FeedPrices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the price for a feed
    pub fn with_price(mut self, feed: Pubkey, price: u128) -> Self {
        self.set_price(feed, price);
        self
    }

    pub fn set_price(&mut self, feed: Pubkey, price: u128) {
        match self.entries.iter_mut().find(|(key, _)| *key == feed) {
            Some(entry) => entry.1 = price,
            None => self.entries.push((feed, price)),
        }
    }

    /// Read every `PriceFeed` account in `accounts`
    ///
    /// Each account must be owned by this program and deserialize as a
    /// feed; anything else is rejected rather than skipped.
    pub fn from_accounts(accounts: &[AccountInfo<'_>]) -> Result<Self> {
        let mut prices = Self::new();
        for info in accounts {
            prices.set_price(*info.key, load_feed_price(info)?);
        }
        Ok(prices)
    }
}

impl PriceOracle for FeedPrices {
    fn get_price(&self, feed: &Pubkey) -> Result<u128> {
        let price = self
            .entries
            .iter()
            .find(|(key, _)| key == feed)
            .map(|(_, price)| *price)
            .ok_or(CometError::PriceFeedMissing)?;

        require!(price > 0, CometError::InvalidPrice);
        Ok(price)
    }
}

/// Deserialize a feed account and return its price
pub fn load_feed_price(info: &AccountInfo<'_>) -> Result<u128> {
    require_keys_eq!(*info.owner, crate::ID, CometError::InvalidPrice);

    let data = info.try_borrow_data()?;
    let feed = PriceFeed::try_deserialize(&mut &data[..])?;

    require!(feed.price > 0, CometError::InvalidPrice);
    Ok(feed.price as u128)
}
