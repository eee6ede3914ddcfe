//! Threshold-Crossing Sweeper
//!
//! Derives a static buy and sell threshold from a product's (mean, std) and
//! takes every resting order that crosses them:
//!
//! ```text
//! spread_buffer  = max(spread_floor, best_ask - best_bid)   (floor if one-sided
//!                                                           or not widening)
//! buy_threshold  = mean - std + spread_buffer
//! sell_threshold = mean + std - spread_buffer
//! ```
//!
//! Asks are swept lowest first, bids highest first. Every fill advances the
//! running position, so deeper levels only see what headroom is left.

use crate::error::{ConfigError, ConfigResult};
use crate::strategy::{Strategy, StrategyContext};
use log::{debug, info};
use meridian_core::{Order, OrderBookSnapshot, Price};
use meridian_risk::InventoryCursor;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Configuration for the threshold sweeper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub mean: Decimal,
    /// Must be positive
    pub std: Decimal,
    /// Maximum position size (absolute value)
    pub limit: i64,
    /// Minimum spread buffer applied to both thresholds
    #[serde(default = "default_spread_floor")]
    pub spread_floor: Decimal,
    /// Widen the buffer to the quoted spread; when false the floor is used as-is
    #[serde(default = "default_widen_with_spread")]
    pub widen_with_spread: bool,
    /// Price levels to consider per side; `None` sweeps the whole book
    #[serde(default)]
    pub max_levels: Option<usize>,
}

fn default_spread_floor() -> Decimal {
    Decimal::ONE
}

fn default_widen_with_spread() -> bool {
    true
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            mean: dec!(10000),
            std: dec!(1),
            limit: 50,
            spread_floor: default_spread_floor(),
            widen_with_spread: default_widen_with_spread(),
            max_levels: None,
        }
    }
}

impl ThresholdConfig {
    pub fn validate(&self, product: &str) -> ConfigResult<()> {
        if self.std <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveStd {
                product: product.to_string(),
                std: self.std.to_string(),
            });
        }
        if self.limit <= 0 {
            return Err(ConfigError::NonPositiveLimit {
                product: product.to_string(),
                limit: self.limit,
            });
        }
        if self.spread_floor < Decimal::ZERO {
            return Err(ConfigError::NegativeSpread {
                product: product.to_string(),
                value: self.spread_floor.to_string(),
            });
        }
        Ok(())
    }

    /// Spread buffer for this book: the floor, widened by the quoted spread
    /// unless `widen_with_spread` is off
    pub fn spread_buffer(&self, book: &OrderBookSnapshot) -> Decimal {
        match book.spread() {
            Some(spread) if self.widen_with_spread => self.spread_floor.max(spread),
            _ => self.spread_floor,
        }
    }

    /// (buy_threshold, sell_threshold) for this book
    pub fn thresholds(&self, book: &OrderBookSnapshot) -> (Price, Price) {
        let buffer = self.spread_buffer(book);
        (
            self.mean - self.std + buffer,
            self.mean + self.std - buffer,
        )
    }
}

/// Sweeps resting orders that cross a static fair-value band
pub struct ThresholdSweeper {
    product: String,
    config: ThresholdConfig,
}

impl ThresholdSweeper {
    pub fn new(product: impl Into<String>, config: ThresholdConfig) -> Self {
        Self {
            product: product.into(),
            config,
        }
    }

    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Buy orders first (ascending price), then sell orders (descending price)
    pub fn evaluate(&self, book: &OrderBookSnapshot, position: i64) -> Vec<Order> {
        let (buy_threshold, sell_threshold) = self.config.thresholds(book);
        let levels = self.config.max_levels.unwrap_or(usize::MAX);
        let mut cursor = InventoryCursor::new(self.config.limit, position);
        let mut orders = Vec::new();

        for (price, volume) in book.asks_ascending().take(levels) {
            if price >= buy_threshold || cursor.buy_headroom() == 0 {
                break;
            }
            let qty = cursor.take_buy(volume);
            orders.push(Order::buy(&self.product, price, qty));
        }

        for (price, volume) in book.bids_descending().take(levels) {
            if price <= sell_threshold || cursor.sell_headroom() == 0 {
                break;
            }
            let qty = cursor.take_sell(volume);
            orders.push(Order::sell(&self.product, price, qty));
        }

        if orders.is_empty() {
            debug!(
                "[Threshold] {}: nothing crosses buy<{} / sell>{}",
                self.product, buy_threshold, sell_threshold
            );
        } else {
            info!(
                "[Threshold] {}: {} fills, position {} -> {}",
                self.product,
                orders.len(),
                position,
                cursor.position()
            );
        }
        orders
    }
}

impl Strategy for ThresholdSweeper {
    fn name(&self) -> &str {
        "ThresholdSweeper"
    }

    fn product(&self) -> &str {
        &self.product
    }

    fn on_tick(&self, ctx: &mut StrategyContext<'_>) -> Vec<Order> {
        match ctx.book(&self.product) {
            Some(book) => self.evaluate(book, ctx.position(&self.product)),
            None => Vec::new(),
        }
    }
}
