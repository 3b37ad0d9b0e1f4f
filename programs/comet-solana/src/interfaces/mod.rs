//! Interfaces for pricing and interest rates (Oracle, IRM)

pub mod oracle;
pub mod irm;

pub use oracle::*;
pub use irm::*;
