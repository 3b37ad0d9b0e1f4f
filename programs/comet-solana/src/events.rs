use anchor_lang::prelude::*;

// === Market Events ===

#[event]
pub struct MarketInitialized {
    pub market: Pubkey,
    pub admin: Pubkey,
    pub base_mint: Pubkey,
    pub base_price_feed: Pubkey,
    pub base_borrow_min: u128,
}

#[event]
pub struct AssetAdded {
    pub market: Pubkey,
    pub mint: Pubkey,
    pub price_feed: Pubkey,
    pub offset: u8,
    pub borrow_collateral_factor: u64,
    pub liquidate_collateral_factor: u64,
    pub liquidation_factor: u64,
    pub supply_cap: u128,
}

// === Oracle Events ===

#[event]
pub struct PriceUpdated {
    pub price_feed: Pubkey,
    pub price: u64,
    pub updated_at: i64,
}

// === Base Events ===

#[event]
pub struct Supply {
    pub market: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub repaid: u128,
    pub new_principal: i128,
}

#[event]
pub struct Withdraw {
    pub market: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub borrowed: u128,
    pub new_principal: i128,
}

// === Collateral Events ===

#[event]
pub struct SupplyCollateral {
    pub market: Pubkey,
    pub owner: Pubkey,
    pub asset: Pubkey,
    pub amount: u64,
    pub balance: u128,
}

#[event]
pub struct WithdrawCollateral {
    pub market: Pubkey,
    pub owner: Pubkey,
    pub asset: Pubkey,
    pub amount: u64,
    pub balance: u128,
}

// === Absorb Events ===

#[event]
pub struct AbsorbDebt {
    pub market: Pubkey,
    pub absorber: Pubkey,
    pub borrower: Pubkey,
    pub debt_absorbed: u128,
    pub debt_value: u128,
    pub base_credited: u128,
    pub shortfall: u128,
}

#[event]
pub struct AbsorbCollateral {
    pub market: Pubkey,
    pub absorber: Pubkey,
    pub borrower: Pubkey,
    pub asset: Pubkey,
    pub amount: u128,
}

// === Interest Events ===

#[event]
pub struct InterestAccrued {
    pub market: Pubkey,
    pub elapsed: u64,
    pub utilization: u128,
    pub base_supply_index: u128,
    pub base_borrow_index: u128,
}
