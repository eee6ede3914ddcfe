use crate::book::OrderBookSnapshot;
use crate::entities::Positions;
use std::collections::HashMap;

/// Everything the exchange hands the engine on one tick
#[derive(Debug, Clone, Default)]
pub struct TradingState {
    /// Order book snapshot per product
    pub books: HashMap<String, OrderBookSnapshot>,
    /// Caller-reported net positions
    pub positions: Positions,
    /// Opaque continuation token from the previous tick
    pub trader_data: String,
}

impl TradingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_book(mut self, product: impl Into<String>, book: OrderBookSnapshot) -> Self {
        self.books.insert(product.into(), book);
        self
    }

    pub fn with_position(mut self, product: impl Into<String>, quantity: i64) -> Self {
        self.positions.set(product, quantity);
        self
    }

    pub fn with_trader_data(mut self, trader_data: impl Into<String>) -> Self {
        self.trader_data = trader_data.into();
        self
    }

    /// Get order book for a product
    pub fn book(&self, product: &str) -> Option<&OrderBookSnapshot> {
        self.books.get(product)
    }

    /// Net position for a product (zero if absent)
    pub fn position(&self, product: &str) -> i64 {
        self.positions.get(product)
    }
}
