//! Strategy Trait
//!
//! Defines the interface every per-product strategy implements and the
//! context it reads on each tick.

use crate::history::FairValueHistory;
use crate::signal;
use meridian_core::{Order, OrderBookSnapshot, Price, TradingState};

/// Context provided to a strategy on each tick
pub struct StrategyContext<'a> {
    /// Snapshot and positions for this tick
    pub state: &'a TradingState,
    /// Engine-owned smoothing state
    pub history: &'a mut FairValueHistory,
}

impl<'a> StrategyContext<'a> {
    pub fn new(state: &'a TradingState, history: &'a mut FairValueHistory) -> Self {
        Self { state, history }
    }

    /// Get order book for a product
    pub fn book(&self, product: &str) -> Option<&OrderBookSnapshot> {
        self.state.book(product)
    }

    /// Get net position for a product (zero if none)
    pub fn position(&self, product: &str) -> i64 {
        self.state.position(product)
    }

    /// Mid price of a product's book, if it is two-sided
    pub fn mid(&self, product: &str) -> Option<Price> {
        self.book(product).and_then(signal::mid_price)
    }
}

/// Strategy trait - implement this for a per-product decision rule
pub trait Strategy: Send {
    /// Strategy name for logging
    fn name(&self) -> &str;

    /// Product this strategy trades
    fn product(&self) -> &str;

    /// Called once per tick; returns orders in the sequence they should be applied
    fn on_tick(&self, ctx: &mut StrategyContext<'_>) -> Vec<Order>;
}
