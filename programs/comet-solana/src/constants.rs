//! Protocol constants and fixed-point scales

/// Program-specific seed prefix for all PDAs
pub const PROGRAM_SEED_PREFIX: &[u8] = b"comet_v1";

// === Fixed-Point Constants ===

/// Scale of the base supply/borrow indices (1e15 = 1.0)
pub const BASE_INDEX_SCALE: u128 = 1_000_000_000_000_000;

/// Scale of collateral factors, utilization and per-second rates (1e18 = 1.0)
pub const FACTOR_SCALE: u128 = 1_000_000_000_000_000_000;

/// Price scale (1e8 = 1 USD)
pub const PRICE_SCALE: u128 = 100_000_000;

/// Largest token decimals accepted for the base asset or a collateral asset
pub const MAX_ASSET_DECIMALS: u8 = 18;

// === Registry Limits ===

/// Maximum number of collateral assets a market can list
pub const MAX_ASSETS: usize = 8;

// === Interest Rate Constants ===

/// Seconds per year for rate conversions
pub const SECONDS_PER_YEAR: u128 = 31_536_000;

/// Maximum borrow rate per second (1000% APR cap)
pub const MAX_BORROW_RATE_PER_SECOND: u128 = FACTOR_SCALE * 10 / SECONDS_PER_YEAR;
