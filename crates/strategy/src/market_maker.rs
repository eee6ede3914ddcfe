//! Fixed-Offset Market Maker
//!
//! A simple quoting strategy that:
//! - Quotes a bid and an ask at a fixed offset around the mid price
//! - Only quotes when the book is wider than a minimum spread
//! - Respects position limits on each side independently

use crate::error::{ConfigError, ConfigResult};
use crate::strategy::{Strategy, StrategyContext};
use log::{debug, info};
use meridian_core::{Order, OrderBookSnapshot, Price};
use meridian_risk::{clamp_buy, clamp_sell};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Configuration for the market maker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketMakerConfig {
    /// Maximum position (absolute value)
    pub limit: i64,
    /// Quote only when ask - bid is strictly wider than this
    #[serde(default = "default_min_spread")]
    pub min_spread: Decimal,
    /// Distance of each quote from the mid
    #[serde(default = "default_quote_offset")]
    pub quote_offset: Decimal,
    /// Quote size per side
    #[serde(default = "default_quote_size")]
    pub quote_size: i64,
}

fn default_min_spread() -> Decimal {
    Decimal::ONE
}

fn default_quote_offset() -> Decimal {
    Decimal::ONE
}

fn default_quote_size() -> i64 {
    5
}

impl Default for MarketMakerConfig {
    fn default() -> Self {
        Self {
            limit: 50,
            min_spread: default_min_spread(),
            quote_offset: default_quote_offset(),
            quote_size: default_quote_size(),
        }
    }
}

impl MarketMakerConfig {
    pub fn validate(&self, product: &str) -> ConfigResult<()> {
        if self.limit <= 0 {
            return Err(ConfigError::NonPositiveLimit {
                product: product.to_string(),
                limit: self.limit,
            });
        }
        if self.quote_size <= 0 {
            return Err(ConfigError::NonPositiveSize {
                product: product.to_string(),
                size: self.quote_size,
            });
        }
        for value in [self.min_spread, self.quote_offset] {
            if value < Decimal::ZERO {
                return Err(ConfigError::NegativeSpread {
                    product: product.to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Fixed-offset two-sided quoter
pub struct BasicMarketMaker {
    product: String,
    config: MarketMakerConfig,
}

impl BasicMarketMaker {
    pub fn new(product: impl Into<String>, config: MarketMakerConfig) -> Self {
        Self {
            product: product.into(),
            config,
        }
    }

    pub fn config(&self) -> &MarketMakerConfig {
        &self.config
    }

    /// Quote prices around `mid`, rounded down to whole ticks
    fn calculate_quotes(&self, mid: Price) -> (Price, Price) {
        (
            (mid - self.config.quote_offset).floor(),
            (mid + self.config.quote_offset).floor(),
        )
    }

    pub fn evaluate(&self, book: &OrderBookSnapshot, position: i64) -> Vec<Order> {
        let (Some(mid), Some(spread)) = (book.mid_price(), book.spread()) else {
            debug!("[MarketMaker] {}: one-sided book, not quoting", self.product);
            return Vec::new();
        };
        if spread <= self.config.min_spread {
            debug!(
                "[MarketMaker] {}: spread {} too tight to quote",
                self.product, spread
            );
            return Vec::new();
        }

        let (bid_price, ask_price) = self.calculate_quotes(mid);
        let mut orders = Vec::new();

        let bid_qty = clamp_buy(self.config.limit, position, self.config.quote_size);
        if bid_qty > 0 {
            orders.push(Order::buy(&self.product, bid_price, bid_qty));
        }
        let ask_qty = clamp_sell(self.config.limit, position, self.config.quote_size);
        if ask_qty > 0 {
            orders.push(Order::sell(&self.product, ask_price, ask_qty));
        }

        if !orders.is_empty() {
            info!(
                "[MarketMaker] {} quoting: bid={}@{} ask={}@{} pos={} mid={}",
                self.product, bid_price, bid_qty, ask_price, ask_qty, position, mid
            );
        }
        orders
    }
}

impl Strategy for BasicMarketMaker {
    fn name(&self) -> &str {
        "BasicMarketMaker"
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
