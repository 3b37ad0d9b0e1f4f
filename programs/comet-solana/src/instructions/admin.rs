//! Admin instructions
//!
//! - Initialize a market for a base asset
//! - List collateral assets
//! - Create and update price feeds

use anchor_lang::prelude::*;
use anchor_spl::token_2022::spl_token_2022::{
    extension::{transfer_fee::TransferFeeConfig, BaseStateWithExtensions, StateWithExtensions},
    state::Mint as MintState,
};
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::PROGRAM_SEED_PREFIX;
use crate::errors::CometError;
use crate::events::{AssetAdded, MarketInitialized, PriceUpdated};
use crate::state::{AssetParams, Market, MarketConfig, PriceFeed};

// ============================================================================
// Initialize Market
// ============================================================================

#[derive(Accounts)]
pub struct InitializeMarket<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = Market::space(),
        seeds = [PROGRAM_SEED_PREFIX, Market::SEED, base_mint.key().as_ref()],
        bump,
    )]
    pub market: Box<Account<'info, Market>>,

    pub base_mint: InterfaceAccount<'info, Mint>,

    pub base_price_feed: Account<'info, PriceFeed>,

    #[account(
        init,
        payer = admin,
        token::mint = base_mint,
        token::authority = market,
        token::token_program = token_program,
        seeds = [
            PROGRAM_SEED_PREFIX,
            Market::VAULT_SEED,
            market.key().as_ref(),
            base_mint.key().as_ref(),
        ],
        bump,
    )]
    pub base_vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

/// Reject Token-2022 mints that charge a transfer fee
///
/// Balances are credited with the instruction amount, so the vault must
/// receive exactly that amount.
pub fn ensure_supported_mint(mint: &AccountInfo<'_>) -> Result<()> {
    let data = mint.try_borrow_data()?;
    let state = StateWithExtensions::<MintState>::unpack(&data)?;
    require!(
        state.get_extension::<TransferFeeConfig>().is_err(),
        CometError::UnsupportedMint
    );
    Ok(())
}

pub fn initialize_market(ctx: Context<InitializeMarket>, config: MarketConfig) -> Result<()> {
    ensure_supported_mint(&ctx.accounts.base_mint.to_account_info())?;
    let now = Clock::get()?.unix_timestamp;

    let mut market = Market::new(
        ctx.accounts.admin.key(),
        ctx.accounts.base_mint.key(),
        ctx.accounts.base_mint.decimals,
        ctx.accounts.base_price_feed.key(),
        config,
        now,
    )?;
    market.bump = ctx.bumps.market;
    market.base_vault_bump = ctx.bumps.base_vault;
    ctx.accounts.market.set_inner(market);

    let market = &ctx.accounts.market;
    emit!(MarketInitialized {
        market: market.key(),
        admin: market.admin,
        base_mint: market.base_mint,
        base_price_feed: market.base_price_feed,
        base_borrow_min: market.base_borrow_min,
    });

    Ok(())
}

// ============================================================================
// Add Collateral Asset
// ============================================================================

#[derive(Accounts)]
pub struct AddAsset<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, Market::SEED, market.base_mint.as_ref()],
        bump = market.bump,
        has_one = admin @ CometError::Unauthorized,
    )]
    pub market: Box<Account<'info, Market>>,

    pub asset_mint: InterfaceAccount<'info, Mint>,

    pub price_feed: Account<'info, PriceFeed>,

    #[account(
        init,
        payer = admin,
        token::mint = asset_mint,
        token::authority = market,
        token::token_program = token_program,
        seeds = [
            PROGRAM_SEED_PREFIX,
            Market::VAULT_SEED,
            market.key().as_ref(),
            asset_mint.key().as_ref(),
        ],
        bump,
    )]
    pub asset_vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn add_asset(ctx: Context<AddAsset>, params: AssetParams) -> Result<()> {
    ensure_supported_mint(&ctx.accounts.asset_mint.to_account_info())?;
    let mint = ctx.accounts.asset_mint.key();
    let price_feed = ctx.accounts.price_feed.key();

    let market = &mut ctx.accounts.market;
    let offset = market.add_asset(
        mint,
        price_feed,
        ctx.accounts.asset_mint.decimals,
        params,
        ctx.bumps.asset_vault,
    )?;

    emit!(AssetAdded {
        market: market.key(),
        mint,
        price_feed,
        offset,
        borrow_collateral_factor: params.borrow_collateral_factor,
        liquidate_collateral_factor: params.liquidate_collateral_factor,
        liquidation_factor: params.liquidation_factor,
        supply_cap: params.supply_cap,
    });

    Ok(())
}

// ============================================================================
// Price Feeds
// ============================================================================

#[derive(Accounts)]
pub struct InitPriceFeed<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = PriceFeed::space(),
    )]
    pub price_feed: Account<'info, PriceFeed>,

    pub system_program: Program<'info, System>,
}

pub fn init_price_feed(ctx: Context<InitPriceFeed>, price: u64) -> Result<()> {
    require!(price > 0, CometError::InvalidPrice);
    let now = Clock::get()?.unix_timestamp;

    let feed = &mut ctx.accounts.price_feed;
    feed.admin = ctx.accounts.admin.key();
    feed.price = price;
    feed.updated_at = now;

    emit!(PriceUpdated {
        price_feed: feed.key(),
        price,
        updated_at: now,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SetPrice<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        has_one = admin @ CometError::Unauthorized,
    )]
    pub price_feed: Account<'info, PriceFeed>,
}

pub fn set_price(ctx: Context<SetPrice>, price: u64) -> Result<()> {
    require!(price > 0, CometError::InvalidPrice);
    let now = Clock::get()?.unix_timestamp;

    let feed = &mut ctx.accounts.price_feed;
    feed.price = price;
    feed.updated_at = now;

    emit!(PriceUpdated {
        price_feed: feed.key(),
        price,
        updated_at: now,
    });

    Ok(())
}
