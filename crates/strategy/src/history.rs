//! Smoothed fair-value history
//!
//! Each composite product owns a bounded FIFO of its most recent synthetic
//! values; the smoothed fair value is their arithmetic mean. The history is
//! the engine's only cross-tick state and is an explicit value so callers can
//! inspect it, persist it, or start an engine from a prior history.

use meridian_core::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Default number of synthetic values kept per composite
pub const DEFAULT_WINDOW: usize = 10;

/// Bounded trailing window of values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmoothingWindow {
    /// Values in the window, oldest first
    values: VecDeque<Price>,
    /// Window size
    window_size: usize,
}

impl SmoothingWindow {
    /// Create an empty window (sizes below 1 are raised to 1)
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            values: VecDeque::with_capacity(window_size),
            window_size,
        }
    }

    /// Append a value, evicting the oldest ones beyond the window
    pub fn push(&mut self, value: Price) {
        self.values.push_back(value);
        while self.values.len() > self.window_size {
            self.values.pop_front();
        }
    }

    /// Arithmetic mean of the retained values
    pub fn mean(&self) -> Option<Price> {
        if self.values.is_empty() {
            return None;
        }
        let sum: Decimal = self.values.iter().copied().sum();
        Some(sum / Decimal::from(self.values.len()))
    }

    /// Get the most recent value
    #[inline]
    pub fn last(&self) -> Option<Price> {
        self.values.back().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check if window is full
    #[inline]
    pub fn is_full(&self) -> bool {
        self.values.len() >= self.window_size
    }

    #[inline]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn values(&self) -> impl Iterator<Item = Price> + '_ {
        self.values.iter().copied()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// Per-composite smoothing state owned by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FairValueHistory {
    window_size: usize,
    series: HashMap<String, SmoothingWindow>,
}

impl Default for FairValueHistory {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl FairValueHistory {
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size: window_size.max(1),
            series: HashMap::new(),
        }
    }

    /// Start a product's window from prior values (oldest first)
    pub fn seed(&mut self, product: impl Into<String>, values: impl IntoIterator<Item = Price>) {
        let mut window = SmoothingWindow::new(self.window_size);
        for value in values {
            window.push(value);
        }
        self.series.insert(product.into(), window);
    }

    /// Record a new synthetic value and return the smoothed fair value.
    ///
    /// The product's window is created on first use.
    pub fn smooth(&mut self, product: &str, value: Price) -> Price {
        let window_size = self.window_size;
        let window = self
            .series
            .entry(product.to_string())
            .or_insert_with(|| SmoothingWindow::new(window_size));
        window.push(value);
        window.mean().unwrap_or(value)
    }

    /// Current smoothed value without recording anything
    pub fn smoothed(&self, product: &str) -> Option<Price> {
        self.series.get(product).and_then(SmoothingWindow::mean)
    }

    pub fn window(&self, product: &str) -> Option<&SmoothingWindow> {
        self.series.get(product)
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Products with at least one recorded value
    pub fn products(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_first_update_returns_value() {
        let mut history = FairValueHistory::default();
        assert_eq!(history.smooth("PICNIC_BASKET1", dec!(1250)), dec!(1250));
        assert_eq!(history.smoothed("PICNIC_BASKET1"), Some(dec!(1250)));
        assert_eq!(history.smoothed("PICNIC_BASKET2"), None);
    }

    #[test]
    fn test_mean_of_retained_values() {
        let mut history = FairValueHistory::new(3);
        history.smooth("B", dec!(10));
        assert_eq!(history.smooth("B", dec!(20)), dec!(15));
        assert_eq!(history.smooth("B", dec!(30)), dec!(20));
        // 10 evicted
        assert_eq!(history.smooth("B", dec!(40)), dec!(30));
        assert_eq!(history.window("B").map(SmoothingWindow::len), Some(3));
    }

    #[test]
    fn test_window_only_depends_on_last_inputs() {
        let mut a = FairValueHistory::default();
        let mut b = FairValueHistory::default();

        // Different early histories
        for i in 0..25 {
            a.smooth("B", Decimal::from(i * 1000));
        }
        for _ in 0..3 {
            b.smooth("B", dec!(-77));
        }

        // Same last ten inputs
        let mut last_a = Decimal::ZERO;
        let mut last_b = Decimal::ZERO;
        for i in 0..DEFAULT_WINDOW {
            let v = Decimal::from(500 + i as i64);
            last_a = a.smooth("B", v);
            last_b = b.smooth("B", v);
        }
        assert_eq!(last_a, last_b);
        assert_eq!(last_a, dec!(504.5));
    }

    #[test]
    fn test_series_are_independent() {
        let mut history = FairValueHistory::default();
        history.smooth("B1", dec!(100));
        history.smooth("B2", dec!(300));
        assert_eq!(history.smooth("B1", dec!(200)), dec!(150));
        assert_eq!(history.smoothed("B2"), Some(dec!(300)));

        let mut products: Vec<_> = history.products().collect();
        products.sort();
        assert_eq!(products, vec!["B1", "B2"]);
    }

    #[test]
    fn test_seeded_history() {
        let mut history = FairValueHistory::new(4);
        history.seed("B", [dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)]);
        let window = history.window("B").unwrap();
        assert!(window.is_full());
        assert_eq!(window.values().collect::<Vec<_>>(), vec![dec!(2), dec!(3), dec!(4), dec!(5)]);
        assert_eq!(history.smooth("B", dec!(6)), dec!(4.5));
    }

    #[test]
    fn test_history_serde_roundtrip() {
        let mut history = FairValueHistory::default();
        history.smooth("B", dec!(1250));
        history.smooth("B", dec!(1260));

        let json = serde_json::to_string(&history).unwrap();
        let restored: FairValueHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, history);
        assert_eq!(restored.smoothed("B"), Some(dec!(1255)));
    }

    #[test]
    fn test_zero_window_is_raised_to_one() {
        let mut window = SmoothingWindow::new(0);
        window.push(dec!(1));
        window.push(dec!(2));
        assert_eq!(window.window_size(), 1);
        assert_eq!(window.mean(), Some(dec!(2)));
        assert_eq!(window.last(), Some(dec!(2)));
        window.clear();
        assert!(window.is_empty());
    }
}
