//! Market state account
//!
//! One account per base asset. Holds the base-asset totals and indices,
//! the interest rate model, and the collateral registry: an append-only,
//! insertion-ordered list of collateral asset configurations plus the
//! per-asset collateral totals.

use anchor_lang::prelude::*;
use crate::constants::{
    BASE_INDEX_SCALE, FACTOR_SCALE, MAX_ASSETS, MAX_ASSET_DECIMALS, PROGRAM_SEED_PREFIX,
};
use crate::errors::CometError;
use crate::interfaces::{utilization, InterestRateModel};
use crate::math::{checked_sub, present_borrow, present_supply};

/// Risk parameters for one collateral asset
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AssetConfig {
    /// Collateral token mint
    pub mint: Pubkey,

    /// Price feed quoting this asset in USD
    pub price_feed: Pubkey,

    /// Position in the registry (insertion order)
    pub offset: u8,

    /// Token decimals (cached from the mint)
    pub decimals: u8,

    /// Share of USD value counted toward borrowing power (FACTOR-scaled)
    pub borrow_collateral_factor: u64,

    /// Share of USD value counted toward liquidation safety (FACTOR-scaled)
    pub liquidate_collateral_factor: u64,

    /// Share of USD value credited when the asset is absorbed (FACTOR-scaled)
    pub liquidation_factor: u64,

    /// Maximum total collateral the market holds for this asset
    pub supply_cap: u128,

    /// Bump for the asset's vault PDA
    pub vault_bump: u8,
}

impl AssetConfig {
    pub const SIZE: usize = 32 + 32 + 1 + 1 + 8 + 8 + 8 + 16 + 1;
}

/// Admin-supplied parameters for listing a collateral asset
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssetParams {
    pub borrow_collateral_factor: u64,
    pub liquidate_collateral_factor: u64,
    pub liquidation_factor: u64,
    pub supply_cap: u128,
}

impl AssetParams {
    /// 0 <= borrow CF <= liquidate CF < 1 and 0 < liquidation factor <= 1
    pub fn validate(&self) -> Result<()> {
        let scale = FACTOR_SCALE as u64;
        require!(
            self.borrow_collateral_factor <= self.liquidate_collateral_factor,
            CometError::InvalidAssetConfig
        );
        require!(
            self.liquidate_collateral_factor < scale,
            CometError::InvalidAssetConfig
        );
        require!(
            self.liquidation_factor > 0 && self.liquidation_factor <= scale,
            CometError::InvalidAssetConfig
        );
        Ok(())
    }
}

/// Admin-supplied market parameters
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarketConfig {
    /// Smallest debt an account may hold after a withdrawal (base units)
    pub base_borrow_min: u64,

    pub rate_model: InterestRateModel,
}

/// Raw principal totals and indices
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TotalsBasic {
    pub base_supply_index: u128,
    pub base_borrow_index: u128,
    pub total_supply_base: u128,
    pub total_borrow_base: u128,
    pub last_accrual_time: i64,
}

/// Lending market state
///
/// PDA Seeds: [PROGRAM_SEED_PREFIX, b"comet_market", base_mint]
#[account]
#[derive(Debug)]
pub struct Market {
    /// PDA bump seed
    pub bump: u8,

    /// Lists collateral assets
    pub admin: Pubkey,

    // === Base Asset ===

    /// Base token mint
    pub base_mint: Pubkey,

    /// Base token decimals (cached from the mint)
    pub base_decimals: u8,

    /// Price feed quoting the base asset in USD
    pub base_price_feed: Pubkey,

    /// Smallest debt an account may hold (base units)
    pub base_borrow_min: u128,

    pub rate_model: InterestRateModel,

    // === Accrual State ===

    /// Total supplied principal
    pub total_supply_base: u128,

    /// Total borrowed principal
    pub total_borrow_base: u128,

    /// Supply index (BASE_INDEX_SCALE = 1.0), never decreases
    pub base_supply_index: u128,

    /// Borrow index (BASE_INDEX_SCALE = 1.0), never decreases
    pub base_borrow_index: u128,

    /// Last interest accrual timestamp
    pub last_accrual_time: i64,

    /// Base debt absorbed without enough collateral to cover it
    pub absorbed_shortfall: u128,

    // === Collateral Registry ===

    /// Number of listed collateral assets
    pub num_assets: u8,

    /// Listed assets in insertion order; only the first num_assets are live
    pub assets: [AssetConfig; MAX_ASSETS],

    /// Collateral held on behalf of accounts, per asset
    pub totals_collateral: [u128; MAX_ASSETS],

    /// Collateral seized by absorb and now owned by the protocol, per asset
    pub collateral_reserves: [u128; MAX_ASSETS],

    // === Vault Bumps ===

    /// Bump for the base vault PDA
    pub base_vault_bump: u8,

    /// Reserved for future use
    pub reserved: [u8; 64],
}

impl Market {
    pub const SEED: &'static [u8] = b"comet_market";
    pub const VAULT_SEED: &'static [u8] = b"comet_vault";

    pub fn space() -> usize {
        8 +                                 // discriminator
        1 +                                 // bump
        32 +                                // admin
        32 +                                // base_mint
        1 +                                 // base_decimals
        32 +                                // base_price_feed
        16 +                                // base_borrow_min
        InterestRateModel::SIZE +           // rate_model
        16 +                                // total_supply_base
        16 +                                // total_borrow_base
        16 +                                // base_supply_index
        16 +                                // base_borrow_index
        8 +                                 // last_accrual_time
        16 +                                // absorbed_shortfall
        1 +                                 // num_assets
        AssetConfig::SIZE * MAX_ASSETS +    // assets
        16 * MAX_ASSETS +                   // totals_collateral
        16 * MAX_ASSETS +                   // collateral_reserves
        1 +                                 // base_vault_bump
        64                                  // reserved
    }

    /// Fresh market with unit indices and an empty registry
    pub fn new(
        admin: Pubkey,
        base_mint: Pubkey,
        base_decimals: u8,
        base_price_feed: Pubkey,
        config: MarketConfig,
        now: i64,
    ) -> Result<Self> {
        require!(base_decimals <= MAX_ASSET_DECIMALS, CometError::InvalidAssetConfig);
        config.rate_model.validate()?;

        Ok(Self {
            bump: 0,
            admin,
            base_mint,
            base_decimals,
            base_price_feed,
            base_borrow_min: config.base_borrow_min as u128,
            rate_model: config.rate_model,
            total_supply_base: 0,
            total_borrow_base: 0,
            base_supply_index: BASE_INDEX_SCALE,
            base_borrow_index: BASE_INDEX_SCALE,
            last_accrual_time: now,
            absorbed_shortfall: 0,
            num_assets: 0,
            assets: [AssetConfig::default(); MAX_ASSETS],
            totals_collateral: [0; MAX_ASSETS],
            collateral_reserves: [0; MAX_ASSETS],
            base_vault_bump: 0,
            reserved: [0; 64],
        })
    }

    // === Collateral Registry ===

    /// Listed assets in insertion order
    pub fn listed_assets(&self) -> &[AssetConfig] {
        &self.assets[..self.num_assets as usize]
    }

    /// Registry offset of a listed asset
    pub fn asset_offset(&self, mint: &Pubkey) -> Result<usize> {
        self.listed_assets()
            .iter()
            .position(|asset| asset.mint == *mint)
            .ok_or_else(|| CometError::UnknownAsset.into())
    }

    /// Configuration of a listed asset
    pub fn asset_config(&self, mint: &Pubkey) -> Result<&AssetConfig> {
        let offset = self.asset_offset(mint)?;
        Ok(&self.assets[offset])
    }

    /// Configuration by registry index
    pub fn get_asset_info(&self, index: u8) -> Result<AssetConfig> {
        self.listed_assets()
            .get(index as usize)
            .copied()
            .ok_or_else(|| CometError::InvalidAssetIndex.into())
    }

    pub fn is_base(&self, mint: &Pubkey) -> bool {
        self.base_mint == *mint
    }

    /// Append a collateral asset; returns its offset
    pub fn add_asset(
        &mut self,
        mint: Pubkey,
        price_feed: Pubkey,
        decimals: u8,
        params: AssetParams,
        vault_bump: u8,
    ) -> Result<u8> {
        params.validate()?;
        require!(decimals <= MAX_ASSET_DECIMALS, CometError::InvalidAssetConfig);
        require!(
            (self.num_assets as usize) < MAX_ASSETS,
            CometError::TooManyAssets
        );
        require!(
            !self.is_base(&mint) && self.asset_offset(&mint).is_err(),
            CometError::AssetAlreadyListed
        );

        let offset = self.num_assets;
        self.assets[offset as usize] = AssetConfig {
            mint,
            price_feed,
            offset,
            decimals,
            borrow_collateral_factor: params.borrow_collateral_factor,
            liquidate_collateral_factor: params.liquidate_collateral_factor,
            liquidation_factor: params.liquidation_factor,
            supply_cap: params.supply_cap,
            vault_bump,
        };
        self.num_assets += 1;
        Ok(offset)
    }

    // === Totals ===

    pub fn totals_basic(&self) -> TotalsBasic {
        TotalsBasic {
            base_supply_index: self.base_supply_index,
            base_borrow_index: self.base_borrow_index,
            total_supply_base: self.total_supply_base,
            total_borrow_base: self.total_borrow_base,
            last_accrual_time: self.last_accrual_time,
        }
    }

    /// Present value of all supplied base at the stored index
    pub fn total_supply(&self) -> Result<u128> {
        present_supply(self.total_supply_base, self.base_supply_index)
    }

    /// Present value of all borrowed base at the stored index
    pub fn total_borrow(&self) -> Result<u128> {
        present_borrow(self.total_borrow_base, self.base_borrow_index)
    }

    /// Utilization at the stored indices (FACTOR-scaled)
    pub fn utilization(&self) -> Result<u128> {
        utilization(self.total_supply()?, self.total_borrow()?)
    }

    /// Base asset available to withdraw or borrow
    pub fn available_liquidity(&self) -> Result<u128> {
        let supply = self.total_supply()?;
        let borrow = self.total_borrow()?;
        if borrow >= supply {
            return Ok(0);
        }
        checked_sub(supply, borrow)
    }
}

/// Derive market PDA
pub fn derive_market(program_id: &Pubkey, base_mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PROGRAM_SEED_PREFIX, Market::SEED, base_mint.as_ref()],
        program_id,
    )
}

/// Derive vault PDA for a listed mint (base or collateral)
pub fn derive_vault(program_id: &Pubkey, market: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PROGRAM_SEED_PREFIX, Market::VAULT_SEED, market.as_ref(), mint.as_ref()],
        program_id,
    )
}
