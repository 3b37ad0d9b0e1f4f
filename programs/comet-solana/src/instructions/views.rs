//! Read-only instructions
//!
//! Results are returned through return data. Interest is projected to the
//! current time on a copy of the market; nothing is written.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;
use crate::constants::PROGRAM_SEED_PREFIX;
use crate::errors::CometError;
use crate::interfaces::FeedPrices;
use crate::ledger::views;
use crate::state::{AssetConfig, LiquidatorPoints, Market, Position, PriceFeed, TotalsBasic};

#[derive(Accounts)]
pub struct MarketView<'info> {
    #[account(
        seeds = [PROGRAM_SEED_PREFIX, Market::SEED, market.base_mint.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,
}

#[derive(Accounts)]
pub struct PositionView<'info> {
    #[account(
        seeds = [PROGRAM_SEED_PREFIX, Market::SEED, market.base_mint.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        seeds = [PROGRAM_SEED_PREFIX, Position::SEED, market.key().as_ref(), position.owner.as_ref()],
        bump = position.bump,
    )]
    pub position: Box<Account<'info, Position>>,
}

#[derive(Accounts)]
pub struct ReservesView<'info> {
    #[account(
        seeds = [PROGRAM_SEED_PREFIX, Market::SEED, market.base_mint.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        seeds = [
            PROGRAM_SEED_PREFIX,
            Market::VAULT_SEED,
            market.key().as_ref(),
            market.base_mint.as_ref(),
        ],
        bump = market.base_vault_bump,
    )]
    pub base_vault: InterfaceAccount<'info, TokenAccount>,
}

#[derive(Accounts)]
pub struct PriceView<'info> {
    pub price_feed: Account<'info, PriceFeed>,
}

#[derive(Accounts)]
pub struct LiquidatorView<'info> {
    pub liquidator_points: Account<'info, LiquidatorPoints>,
}

fn now() -> Result<i64> {
    Ok(Clock::get()?.unix_timestamp)
}

// ============================================================================
// Market
// ============================================================================

pub fn get_utilization(ctx: Context<MarketView>) -> Result<u128> {
    views::get_utilization(&ctx.accounts.market, now()?)
}

pub fn get_supply_rate(ctx: Context<MarketView>, utilization: u128) -> Result<u128> {
    views::get_supply_rate(&ctx.accounts.market, utilization)
}

pub fn get_borrow_rate(ctx: Context<MarketView>, utilization: u128) -> Result<u128> {
    views::get_borrow_rate(&ctx.accounts.market, utilization)
}

pub fn total_supply(ctx: Context<MarketView>) -> Result<u128> {
    views::total_supply(&ctx.accounts.market, now()?)
}

pub fn total_borrow(ctx: Context<MarketView>) -> Result<u128> {
    views::total_borrow(&ctx.accounts.market, now()?)
}

pub fn totals_basic(ctx: Context<MarketView>) -> Result<TotalsBasic> {
    Ok(ctx.accounts.market.totals_basic())
}

pub fn base_borrow_min(ctx: Context<MarketView>) -> Result<u128> {
    Ok(ctx.accounts.market.base_borrow_min)
}

pub fn get_reserves(ctx: Context<ReservesView>) -> Result<i128> {
    views::get_reserves(&ctx.accounts.market, ctx.accounts.base_vault.amount, now()?)
}

// ============================================================================
// Collateral Registry
// ============================================================================

pub fn num_assets(ctx: Context<MarketView>) -> Result<u8> {
    Ok(ctx.accounts.market.num_assets)
}

pub fn get_asset_info(ctx: Context<MarketView>, index: u8) -> Result<AssetConfig> {
    ctx.accounts.market.get_asset_info(index)
}

pub fn get_asset_info_by_address(ctx: Context<MarketView>, asset: Pubkey) -> Result<AssetConfig> {
    ctx.accounts.market.asset_config(&asset).copied()
}

// ============================================================================
// Positions
// ============================================================================

pub fn balance_of(ctx: Context<PositionView>) -> Result<u128> {
    views::balance_of(&ctx.accounts.market, &ctx.accounts.position, now()?)
}

pub fn borrow_balance_of(ctx: Context<PositionView>) -> Result<u128> {
    views::borrow_balance_of(&ctx.accounts.market, &ctx.accounts.position, now()?)
}

pub fn collateral_balance_of(ctx: Context<PositionView>, asset: Pubkey) -> Result<u128> {
    views::collateral_balance_of(&ctx.accounts.market, &ctx.accounts.position, &asset)
}

pub fn is_borrow_collateralized(ctx: Context<PositionView>) -> Result<bool> {
    let prices = FeedPrices::from_accounts(ctx.remaining_accounts)?;
    views::is_borrow_collateralized(&ctx.accounts.market, &ctx.accounts.position, &prices, now()?)
}

pub fn is_liquidatable(ctx: Context<PositionView>) -> Result<bool> {
    let prices = FeedPrices::from_accounts(ctx.remaining_accounts)?;
    views::is_liquidatable(&ctx.accounts.market, &ctx.accounts.position, &prices, now()?)
}

pub fn health_factor(ctx: Context<PositionView>) -> Result<Option<u128>> {
    let prices = FeedPrices::from_accounts(ctx.remaining_accounts)?;
    views::health_factor(&ctx.accounts.market, &ctx.accounts.position, &prices, now()?)
}

pub fn borrow_capacity(ctx: Context<PositionView>) -> Result<u128> {
    let prices = FeedPrices::from_accounts(ctx.remaining_accounts)?;
    views::borrow_capacity(&ctx.accounts.market, &ctx.accounts.position, &prices, now()?)
}

// ============================================================================
// Oracle / Liquidators
// ============================================================================

pub fn get_price(ctx: Context<PriceView>) -> Result<u64> {
    let price = ctx.accounts.price_feed.price;
    require!(price > 0, CometError::InvalidPrice);
    Ok(price)
}

pub fn liquidator_points(ctx: Context<LiquidatorView>) -> Result<LiquidatorPoints> {
    Ok((*ctx.accounts.liquidator_points).clone())
}
