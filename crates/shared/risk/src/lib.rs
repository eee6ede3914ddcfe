//! Meridian Risk
//!
//! Limit-aware clamping of order sizes. Every product carries a symmetric
//! inventory limit `L`; after any clamped order is applied the position
//! satisfies `|position| <= L`.
//!
//! Clamping is silent: an oversized request is truncated, never rejected,
//! down to (and no lower than) zero.

mod inventory;

pub use inventory::{InventoryCursor, clamp, clamp_buy, clamp_sell};
