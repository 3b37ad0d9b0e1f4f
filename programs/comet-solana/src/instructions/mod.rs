//! Instruction handlers for the Comet market

pub mod admin;
pub mod supply;
pub mod withdraw;
pub mod absorb;
pub mod views;
pub mod utils;

pub use admin::*;
pub use supply::*;
pub use withdraw::*;
pub use absorb::*;
pub use views::*;
pub use utils::*;
