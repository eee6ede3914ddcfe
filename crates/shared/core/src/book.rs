//! Order Book Snapshot
//!
//! A read-only view of one product's resting orders at a single tick, as
//! handed over by the exchange. Volumes are stored as magnitudes: some feeds
//! report sell-side volume as negative numbers, so the builders normalize.

use crate::values::{Price, Quantity};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Order book snapshot for a single product
///
/// Uses BTreeMap for price levels to maintain sorted order.
/// Bids are read in descending order (highest first).
/// Asks are read in ascending order (lowest first).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBookSnapshot {
    /// Bid levels: price -> resting volume
    bids: BTreeMap<Price, Quantity>,
    /// Ask levels: price -> resting volume
    asks: BTreeMap<Price, Quantity>,
}

impl OrderBookSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from (price, volume) levels; zero-volume levels are dropped
    pub fn from_levels(
        bids: impl IntoIterator<Item = (Price, Quantity)>,
        asks: impl IntoIterator<Item = (Price, Quantity)>,
    ) -> Self {
        let mut book = Self::new();
        for (price, qty) in bids {
            book.set_bid(price, qty);
        }
        for (price, qty) in asks {
            book.set_ask(price, qty);
        }
        book
    }

    /// Set (or clear, when zero) the resting volume at a bid price
    pub fn set_bid(&mut self, price: Price, qty: Quantity) {
        if qty == 0 {
            self.bids.remove(&price);
        } else {
            self.bids.insert(price, qty.abs());
        }
    }

    /// Set (or clear, when zero) the resting volume at an ask price
    pub fn set_ask(&mut self, price: Price, qty: Quantity) {
        if qty == 0 {
            self.asks.remove(&price);
        } else {
            self.asks.insert(price, qty.abs());
        }
    }

    pub fn with_bid(mut self, price: Price, qty: Quantity) -> Self {
        self.set_bid(price, qty);
        self
    }

    pub fn with_ask(mut self, price: Price, qty: Quantity) -> Self {
        self.set_ask(price, qty);
        self
    }

    // === Price Queries ===

    /// Get best bid price and volume
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.bids.iter().next_back().map(|(p, q)| (*p, *q))
    }

    /// Get best ask price and volume
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.asks.iter().next().map(|(p, q)| (*p, *q))
    }

    /// Get mid price (average of best bid and ask)
    pub fn mid_price(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid, _)), Some((ask, _))) => Some((bid + ask) / Decimal::TWO),
            _ => None,
        }
    }

    /// Get spread (ask - bid)
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid, _)), Some((ask, _))) => Some(ask - bid),
            _ => None,
        }
    }

    // === Level Queries ===

    /// Bid levels, highest price first
    pub fn bids_descending(&self) -> impl Iterator<Item = (Price, Quantity)> + '_ {
        self.bids.iter().rev().map(|(p, q)| (*p, *q))
    }

    /// Ask levels, lowest price first
    pub fn asks_ascending(&self) -> impl Iterator<Item = (Price, Quantity)> + '_ {
        self.asks.iter().map(|(p, q)| (*p, *q))
    }

    /// Get volume at a specific bid price
    pub fn bid_qty_at(&self, price: Price) -> Quantity {
        self.bids.get(&price).copied().unwrap_or(0)
    }

    /// Get volume at a specific ask price
    pub fn ask_qty_at(&self, price: Price) -> Quantity {
        self.asks.get(&price).copied().unwrap_or(0)
    }

    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    /// Check if book is empty
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Check if book has both sides (a mid exists)
    pub fn is_two_sided(&self) -> bool {
        !self.bids.is_empty() && !self.asks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_book() -> OrderBookSnapshot {
        OrderBookSnapshot::from_levels(
            vec![(dec!(2028), 12), (dec!(2027), 8), (dec!(2026), 20)],
            vec![(dec!(2029), -10), (dec!(2030), -15), (dec!(2031), -25)],
        )
    }

    #[test]
    fn test_best_prices() {
        let book = sample_book();
        assert_eq!(book.best_bid(), Some((dec!(2028), 12)));
        assert_eq!(book.best_ask(), Some((dec!(2029), 10)));
    }

    #[test]
    fn test_mid_price_and_spread() {
        let book = sample_book();
        assert_eq!(book.mid_price(), Some(dec!(2028.5)));
        assert_eq!(book.spread(), Some(dec!(1)));
    }

    #[test]
    fn test_one_sided_book_has_no_mid() {
        let book = OrderBookSnapshot::new().with_bid(dec!(100), 5);
        assert!(!book.is_two_sided());
        assert_eq!(book.mid_price(), None);
        assert_eq!(book.spread(), None);

        let empty = OrderBookSnapshot::new();
        assert!(empty.is_empty());
        assert_eq!(empty.best_bid(), None);
        assert_eq!(empty.best_ask(), None);
    }

    #[test]
    fn test_level_iteration_order() {
        let book = sample_book();
        let asks: Vec<_> = book.asks_ascending().map(|(p, _)| p).collect();
        assert_eq!(asks, vec![dec!(2029), dec!(2030), dec!(2031)]);

        let bids: Vec<_> = book.bids_descending().map(|(p, _)| p).collect();
        assert_eq!(bids, vec![dec!(2028), dec!(2027), dec!(2026)]);
    }

    #[test]
    fn test_signed_ask_volume_is_normalized() {
        let book = sample_book();
        assert_eq!(book.ask_qty_at(dec!(2030)), 15);
        assert_eq!(book.bid_qty_at(dec!(2027)), 8);
        assert_eq!(book.ask_qty_at(dec!(9999)), 0);
    }

    #[test]
    fn test_zero_volume_clears_level() {
        let mut book = sample_book();
        book.set_ask(dec!(2029), 0);
        assert_eq!(book.best_ask(), Some((dec!(2030), 15)));
        assert_eq!(book.ask_levels(), 2);
        assert_eq!(book.bid_levels(), 3);
    }
}
