use anchor_lang::prelude::*;

#[error_code]
pub enum CometError {
    // === Authorization Errors ===
    #[msg("Caller is not authorized to perform this action")]
    Unauthorized,

    // === Input Validation Errors ===
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Asset is not listed in this market")]
    UnknownAsset,

    #[msg("Asset index is out of range")]
    InvalidAssetIndex,

    #[msg("Asset is already listed in this market")]
    AssetAlreadyListed,

    #[msg("Market already lists the maximum number of assets")]
    TooManyAssets,

    #[msg("Invalid collateral asset configuration")]
    InvalidAssetConfig,

    #[msg("Invalid interest rate model parameters")]
    InvalidRateModel,

    #[msg("Token mints with a transfer fee are not supported")]
    UnsupportedMint,

    // === Accrual Errors ===
    #[msg("Timestamp is earlier than the last accrual")]
    InvalidTimeOrder,

    // === Balance Errors ===
    #[msg("Collateral supply cap exceeded")]
    CapExceeded,

    #[msg("Insufficient balance")]
    InsufficientBalance,

    #[msg("Borrow is below the market minimum")]
    BelowMinimumBorrow,

    #[msg("Insufficient market liquidity")]
    InsufficientLiquidity,

    // === Health Errors ===
    #[msg("Account would not be borrow-collateralized")]
    Undercollateralized,

    #[msg("Account is not liquidatable")]
    NotLiquidatable,

    // === Oracle Errors ===
    #[msg("Oracle returned invalid price")]
    InvalidPrice,

    #[msg("Price feed account was not supplied")]
    PriceFeedMissing,

    // === Math Errors ===
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    #[msg("Division by zero")]
    DivisionByZero,
}
