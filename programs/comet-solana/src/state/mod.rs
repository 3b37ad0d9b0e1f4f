//! State account structures

pub mod market;
pub mod position;
pub mod liquidator;
pub mod price_feed;

pub use market::*;
pub use position::*;
pub use liquidator::*;
pub use price_feed::*;
