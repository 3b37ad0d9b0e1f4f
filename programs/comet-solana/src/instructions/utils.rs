//! Utility instructions (accrue interest, log summaries)

use anchor_lang::prelude::*;
use crate::constants::PROGRAM_SEED_PREFIX;
use crate::errors::CometError;
use crate::events::InterestAccrued;
use crate::interfaces::FeedPrices;
use crate::ledger::{PoolReport, PositionReport};
use crate::math::accrue_interest_on_market;
use crate::state::{Market, Position};

// ============================================================================
// Accrue Interest (Public)
// ============================================================================

#[derive(Accounts)]
pub struct AccrueInterest<'info> {
    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Market::SEED, market.base_mint.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,
}

pub fn accrue_interest_ix(ctx: Context<AccrueInterest>) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;

    let market = &mut ctx.accounts.market;
    let result = accrue_interest_on_market(market, current_time)?;

    emit!(InterestAccrued {
        market: market.key(),
        elapsed: result.elapsed,
        utilization: result.utilization,
        base_supply_index: result.supply_index,
        base_borrow_index: result.borrow_index,
    });

    Ok(())
}

// ============================================================================
// Summaries (logged, no state change)
// ============================================================================

#[derive(Accounts)]
pub struct DescribePool<'info> {
    #[account(
        seeds = [PROGRAM_SEED_PREFIX, Market::SEED, market.base_mint.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,
}

pub fn describe_pool(ctx: Context<DescribePool>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    PoolReport::build(&ctx.accounts.market, now)?.log();
    Ok(())
}

#[derive(Accounts)]
pub struct DescribePosition<'info> {
    #[account(
        seeds = [PROGRAM_SEED_PREFIX, Market::SEED, market.base_mint.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        constraint = position.market == market.key() @ CometError::Unauthorized,
    )]
    pub position: Box<Account<'info, Position>>,
}

pub fn describe_position(ctx: Context<DescribePosition>) -> Result<()> {
    let prices = FeedPrices::from_accounts(ctx.remaining_accounts)?;
    let now = Clock::get()?.unix_timestamp;
    PositionReport::build(&ctx.accounts.market, &ctx.accounts.position, &prices, now)?.log();
    Ok(())
}
