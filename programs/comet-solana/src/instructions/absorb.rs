//! Absorb instruction
//!
//! Anyone may absorb a liquidatable position. No tokens move: seized
//! collateral stays in the vaults as protocol reserves, and the debt is
//! cleared against the base pool. Price feeds go in remaining accounts.

use anchor_lang::prelude::*;
use crate::constants::PROGRAM_SEED_PREFIX;
use crate::events::{AbsorbCollateral, AbsorbDebt};
use crate::interfaces::FeedPrices;
use crate::ledger::absorb_position;
use crate::state::{LiquidatorPoints, Market, Position};

#[derive(Accounts)]
pub struct Absorb<'info> {
    #[account(mut)]
    pub absorber: Signer<'info>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Market::SEED, market.base_mint.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Position::SEED, market.key().as_ref(), position.owner.as_ref()],
        bump = position.bump,
    )]
    pub position: Box<Account<'info, Position>>,

    #[account(
        init_if_needed,
        payer = absorber,
        space = LiquidatorPoints::space(),
        seeds = [
            PROGRAM_SEED_PREFIX,
            LiquidatorPoints::SEED,
            market.key().as_ref(),
            absorber.key().as_ref(),
        ],
        bump,
    )]
    pub liquidator_points: Box<Account<'info, LiquidatorPoints>>,

    pub system_program: Program<'info, System>,
}

pub fn absorb(ctx: Context<Absorb>) -> Result<()> {
    let market_key = ctx.accounts.market.key();
    let absorber = ctx.accounts.absorber.key();
    let borrower = ctx.accounts.position.owner;

    let points = &mut ctx.accounts.liquidator_points;
    if points.liquidator == Pubkey::default() {
        points.bump = ctx.bumps.liquidator_points;
        points.market = market_key;
        points.liquidator = absorber;
    }

    let prices = FeedPrices::from_accounts(ctx.remaining_accounts)?;
    let now = Clock::get()?.unix_timestamp;
    let result = absorb_position(
        &mut ctx.accounts.market,
        &mut ctx.accounts.position,
        &mut ctx.accounts.liquidator_points,
        &prices,
        now,
    )?;

    for asset in ctx.accounts.market.listed_assets() {
        let amount = result.seized[asset.offset as usize];
        if amount > 0 {
            emit!(AbsorbCollateral {
                market: market_key,
                absorber,
                borrower,
                asset: asset.mint,
                amount,
            });
        }
    }

    emit!(AbsorbDebt {
        market: market_key,
        absorber,
        borrower,
        debt_absorbed: result.debt_absorbed,
        debt_value: result.debt_value,
        base_credited: result.base_credited,
        shortfall: result.shortfall,
    });

    Ok(())
}
