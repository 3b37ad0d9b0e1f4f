//! Comet Lending Market on Solana
//!
//! A single-base-asset lending market in the style of Compound III.
//!
//! ## Features
//! - One borrowable base asset per market, earning index-based interest
//! - Multiple collateral assets per market with independent risk factors
//! - Signed base principal: one balance is either a supply or a borrow
//! - Kinked interest rate model with a reserve factor
//! - Protocol-side liquidation (absorb) with shortfall accounting
//! - Token-2022 support for base and collateral tokens (no transfer-fee mints)
//! - CEI pattern for re-entrancy protection

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod math;
pub mod state;
pub mod interfaces;
pub mod ledger;
pub mod instructions;

use instructions::*;
use state::{AssetConfig, AssetParams, MarketConfig};

declare_id!("BQGm5cfvXsoekDLJQeh4dbj5GqXj9uqRXqPCgXS7T6DM");

#[program]
pub mod comet_solana {
    use super::*;

    // =========================================================================
    // Admin Instructions
    // =========================================================================

    pub fn initialize_market(ctx: Context<InitializeMarket>, config: MarketConfig) -> Result<()> {
        instructions::admin::initialize_market(ctx, config)
    }

    pub fn add_asset(ctx: Context<AddAsset>, params: AssetParams) -> Result<()> {
        instructions::admin::add_asset(ctx, params)
    }

    pub fn init_price_feed(ctx: Context<InitPriceFeed>, price: u64) -> Result<()> {
        instructions::admin::init_price_feed(ctx, price)
    }

    pub fn set_price(ctx: Context<SetPrice>, price: u64) -> Result<()> {
        instructions::admin::set_price(ctx, price)
    }

    // =========================================================================
    // Account Instructions
    // =========================================================================

    pub fn supply(ctx: Context<Supply>, amount: u64) -> Result<()> {
        instructions::supply::supply(ctx, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        instructions::withdraw::withdraw(ctx, amount)
    }

    // =========================================================================
    // Liquidation Instructions
    // =========================================================================

    pub fn absorb(ctx: Context<Absorb>) -> Result<()> {
        instructions::absorb::absorb(ctx)
    }

    // =========================================================================
    // Utility Instructions
    // =========================================================================

    pub fn accrue_interest(ctx: Context<AccrueInterest>) -> Result<()> {
        instructions::utils::accrue_interest_ix(ctx)
    }

    pub fn describe_pool(ctx: Context<DescribePool>) -> Result<()> {
        instructions::utils::describe_pool(ctx)
    }

    pub fn describe_position(ctx: Context<DescribePosition>) -> Result<()> {
        instructions::utils::describe_position(ctx)
    }

    // =========================================================================
    // Market Views
    // =========================================================================

    pub fn get_utilization(ctx: Context<MarketView>) -> Result<u128> {
        instructions::views::get_utilization(ctx)
    }

    pub fn get_supply_rate(ctx: Context<MarketView>, utilization: u128) -> Result<u128> {
        instructions::views::get_supply_rate(ctx, utilization)
    }

    pub fn get_borrow_rate(ctx: Context<MarketView>, utilization: u128) -> Result<u128> {
        instructions::views::get_borrow_rate(ctx, utilization)
    }

    pub fn total_supply(ctx: Context<MarketView>) -> Result<u128> {
        instructions::views::total_supply(ctx)
    }

    pub fn total_borrow(ctx: Context<MarketView>) -> Result<u128> {
        instructions::views::total_borrow(ctx)
    }

    pub fn totals_basic(ctx: Context<MarketView>) -> Result<state::TotalsBasic> {
        instructions::views::totals_basic(ctx)
    }

    pub fn base_borrow_min(ctx: Context<MarketView>) -> Result<u128> {
        instructions::views::base_borrow_min(ctx)
    }

    pub fn get_reserves(ctx: Context<ReservesView>) -> Result<i128> {
        instructions::views::get_reserves(ctx)
    }

    pub fn num_assets(ctx: Context<MarketView>) -> Result<u8> {
        instructions::views::num_assets(ctx)
    }

    pub fn get_asset_info(ctx: Context<MarketView>, index: u8) -> Result<AssetConfig> {
        instructions::views::get_asset_info(ctx, index)
    }

    pub fn get_asset_info_by_address(
        ctx: Context<MarketView>,
        asset: Pubkey,
    ) -> Result<AssetConfig> {
        instructions::views::get_asset_info_by_address(ctx, asset)
    }

    // =========================================================================
    // Position Views
    // =========================================================================

    pub fn balance_of(ctx: Context<PositionView>) -> Result<u128> {
        instructions::views::balance_of(ctx)
    }

    pub fn borrow_balance_of(ctx: Context<PositionView>) -> Result<u128> {
        instructions::views::borrow_balance_of(ctx)
    }

    pub fn collateral_balance_of(ctx: Context<PositionView>, asset: Pubkey) -> Result<u128> {
        instructions::views::collateral_balance_of(ctx, asset)
    }

    pub fn is_borrow_collateralized(ctx: Context<PositionView>) -> Result<bool> {
        instructions::views::is_borrow_collateralized(ctx)
    }

    pub fn is_liquidatable(ctx: Context<PositionView>) -> Result<bool> {
        instructions::views::is_liquidatable(ctx)
    }

    pub fn health_factor(ctx: Context<PositionView>) -> Result<Option<u128>> {
        instructions::views::health_factor(ctx)
    }

    pub fn borrow_capacity(ctx: Context<PositionView>) -> Result<u128> {
        instructions::views::borrow_capacity(ctx)
    }

    // =========================================================================
    // Oracle / Liquidator Views
    // =========================================================================

    pub fn get_price(ctx: Context<PriceView>) -> Result<u64> {
        instructions::views::get_price(ctx)
    }

    pub fn liquidator_points(ctx: Context<LiquidatorView>) -> Result<state::LiquidatorPoints> {
        instructions::views::liquidator_points(ctx)
    }
}
