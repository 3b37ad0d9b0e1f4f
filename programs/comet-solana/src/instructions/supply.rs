//! Supply instruction (base or collateral)
//!
//! CEI Pattern: Checks → Effects → Interactions

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface, transfer_checked, TransferChecked};
use crate::constants::PROGRAM_SEED_PREFIX;
use crate::events;
use crate::ledger::{self, Movement};
use crate::state::{Market, Position};

#[derive(Accounts)]
pub struct Supply<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Market::SEED, market.base_mint.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        init_if_needed,
        payer = owner,
        space = Position::space(),
        seeds = [PROGRAM_SEED_PREFIX, Position::SEED, market.key().as_ref(), owner.key().as_ref()],
        bump,
    )]
    pub position: Box<Account<'info, Position>>,

    pub asset_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = owner_token_account.mint == asset_mint.key(),
    )]
    pub owner_token_account: InterfaceAccount<'info, TokenAccount>,

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
    pub system_program: Program<'info, System>,
}

pub fn supply(ctx: Context<Supply>, amount: u64) -> Result<()> {
    let market_key = ctx.accounts.market.key();
    let owner = ctx.accounts.owner.key();
    let asset = ctx.accounts.asset_mint.key();

    // First supply creates the position
    if ctx.accounts.position.owner == Pubkey::default() {
        ctx.accounts
            .position
            .set_inner(Position::new(market_key, owner, ctx.bumps.position));
    }

    // ===== CHECKS + EFFECTS =====
    let now = Clock::get()?.unix_timestamp;
    let outcome = ledger::supply(
        &mut ctx.accounts.market,
        &mut ctx.accounts.position,
        &asset,
        amount,
        now,
    )?;

    // ===== INTERACTIONS =====
    transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.owner_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.owner.to_account_info(),
                mint: ctx.accounts.asset_mint.to_account_info(),
            },
        ),
        amount,
        ctx.accounts.asset_mint.decimals,
    )?;

    match outcome.movement {
        Movement::Base(change) => emit!(events::Supply {
            market: market_key,
            owner,
            amount,
            repaid: change.repaid,
            new_principal: change.new_principal,
        }),
        Movement::Collateral { balance, .. } => emit!(events::SupplyCollateral {
            market: market_key,
            owner,
            asset,
            amount,
            balance,
        }),
    }

    Ok(())
}
