//! Account ledger: base and collateral balances, health, absorb

pub mod base;
pub mod collateral;
pub mod health;
pub mod absorb;
pub mod operations;
pub mod views;
pub mod report;

pub use base::*;
pub use collateral::*;
pub use health::{
    borrow_capacity, collateral_value, debt_value, health_factor, is_borrow_collateralized,
    is_liquidatable, weighted_collateral_value, CollateralFactor,
};
pub use absorb::*;
pub use operations::*;
pub use report::*;
