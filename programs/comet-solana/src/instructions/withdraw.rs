//! Withdraw instruction (base or collateral)
//!
//! Withdrawing more base than supplied borrows the difference. Price feeds
//! for the base asset and every collateral the position holds go in
//! remaining accounts.
//!
//! CEI Pattern: Checks → Effects → Interactions

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface, transfer_checked, TransferChecked};
use crate::constants::PROGRAM_SEED_PREFIX;
use crate::errors::CometError;
use crate::events;
use crate::interfaces::FeedPrices;
use crate::ledger::{self, Movement};
use crate::state::{Market, Position};

#[derive(Accounts)]
pub struct Withdraw<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Market::SEED, market.base_mint.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Position::SEED, market.key().as_ref(), owner.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == owner.key() @ CometError::Unauthorized,
    )]
    pub position: Box<Account<'info, Position>>,

    pub asset_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = receiver_token_account.mint == asset_mint.key(),
    )]
    pub receiver_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [
            PROGRAM_SEED_PREFIX,
            Market::VAULT_SEED,
            market.key().as_ref(),
            asset_mint.key().as_ref(),
        ],
        bump,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    let market_key = ctx.accounts.market.key();
    let owner = ctx.accounts.owner.key();
    let asset = ctx.accounts.asset_mint.key();

    // ===== CHECKS + EFFECTS =====
    let prices = FeedPrices::from_accounts(ctx.remaining_accounts)?;
    let now = Clock::get()?.unix_timestamp;
    let outcome = ledger::withdraw(
        &mut ctx.accounts.market,
        &mut ctx.accounts.position,
        &asset,
        amount,
        &prices,
        now,
    )?;

    // ===== INTERACTIONS =====
    let base_mint = ctx.accounts.market.base_mint;
    let bump = ctx.accounts.market.bump;
    let seeds = &[
        PROGRAM_SEED_PREFIX,
        Market::SEED,
        base_mint.as_ref(),
        &[bump],
    ];

    transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.receiver_token_account.to_account_info(),
                authority: ctx.accounts.market.to_account_info(),
                mint: ctx.accounts.asset_mint.to_account_info(),
            },
            &[seeds],
        ),
        amount,
        ctx.accounts.asset_mint.decimals,
    )?;

    match outcome.movement {
        Movement::Base(change) => emit!(events::Withdraw {
            market: market_key,
            owner,
            amount,
            borrowed: change.borrowed,
            new_principal: change.new_principal,
        }),
        Movement::Collateral { balance, .. } => emit!(events::WithdrawCollateral {
            market: market_key,
            owner,
            asset,
            amount,
            balance,
        }),
    }

    Ok(())
}
