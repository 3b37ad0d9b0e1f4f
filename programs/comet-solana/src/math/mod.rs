//! Math library modules for safe fixed-point arithmetic

pub mod safe_math;
pub mod fixed;
pub mod interest;

pub use safe_math::*;
pub use fixed::*;
pub use interest::*;
