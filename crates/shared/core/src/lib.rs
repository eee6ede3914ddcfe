//! Meridian Core Domain
//!
//! Pure domain types shared by the Meridian decision engine.
//! This crate contains no I/O and is 100% unit testable.

pub mod book;
pub mod entities;
pub mod state;
pub mod values;

// Re-export commonly used types at crate root
pub use book::OrderBookSnapshot;
pub use entities::{Order, Positions, Side};
pub use state::TradingState;
pub use values::{Price, ProductId, Quantity};
