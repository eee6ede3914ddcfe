//! Basket Arbitrage Strategy
//!
//! Trades a composite product against the smoothed synthetic value of its
//! constituents. The synthetic value is recorded into the engine's
//! [`FairValueHistory`](crate::history::FairValueHistory) once per tick, even
//! when the composite itself has no book that tick.

use crate::error::{ConfigError, ConfigResult};
use crate::signal::{self, Constituent, MissingLegPolicy};
use crate::strategy::{Strategy, StrategyContext};
use log::{debug, info};
use meridian_core::{Order, OrderBookSnapshot, Price};
use meridian_risk::{clamp_buy, clamp_sell};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Configuration for a composite product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketConfig {
    /// Weighted legs making up one unit of the composite
    pub constituents: Vec<Constituent>,
    /// Minimum mispricing before trading
    pub min_spread: Decimal,
    /// Maximum position size (absolute value)
    pub limit: i64,
    #[serde(default)]
    pub missing_leg: MissingLegPolicy,
}

impl Default for BasketConfig {
    fn default() -> Self {
        Self {
            constituents: vec![
                Constituent::new("CROISSANTS", 6),
                Constituent::new("JAMS", 3),
                Constituent::new("DJEMBES", 1),
            ],
            min_spread: dec!(5),
            limit: 60,
            missing_leg: MissingLegPolicy::default(),
        }
    }
}

impl BasketConfig {
    pub fn validate(&self, product: &str) -> ConfigResult<()> {
        if self.constituents.is_empty() {
            return Err(ConfigError::EmptyBasket(product.to_string()));
        }
        for leg in &self.constituents {
            if leg.product == product {
                return Err(ConfigError::SelfReferencingBasket(product.to_string()));
            }
            if leg.weight <= 0 {
                return Err(ConfigError::InvalidWeight {
                    product: product.to_string(),
                    constituent: leg.product.clone(),
                    weight: leg.weight,
                });
            }
        }
        if self.min_spread < Decimal::ZERO {
            return Err(ConfigError::NegativeSpread {
                product: product.to_string(),
                value: self.min_spread.to_string(),
            });
        }
        if self.limit <= 0 {
            return Err(ConfigError::NonPositiveLimit {
                product: product.to_string(),
                limit: self.limit,
            });
        }
        Ok(())
    }
}

/// Composite-vs-synthetic arbitrage
pub struct BasketArbitrageur {
    product: String,
    config: BasketConfig,
}

impl BasketArbitrageur {
    pub fn new(product: impl Into<String>, config: BasketConfig) -> Self {
        Self {
            product: product.into(),
            config,
        }
    }

    pub fn config(&self) -> &BasketConfig {
        &self.config
    }

    /// Compute this tick's synthetic value and fold it into the smoothing history
    pub fn fair_value(&self, ctx: &mut StrategyContext<'_>) -> Option<Price> {
        let raw = signal::synthetic_value(
            &self.config.constituents,
            |product| ctx.mid(product),
            self.config.missing_leg,
        )?;
        let smoothed = ctx.history.smooth(&self.product, raw);
        debug!(
            "[Basket] {}: synthetic={}, smoothed={}",
            self.product, raw, smoothed
        );
        Some(smoothed)
    }

    /// Trade the best level on each side that is mispriced against `fair`
    pub fn evaluate(&self, book: &OrderBookSnapshot, fair: Price, position: i64) -> Vec<Order> {
        let limit = self.config.limit;
        let mut orders = Vec::new();

        if let Some((ask, volume)) = book.best_ask()
            && ask < fair - self.config.min_spread
        {
            let qty = clamp_buy(limit, position, volume);
            if qty > 0 {
                info!(
                    "[Basket] BUY {}: ask={} < fair={} - {}, qty={}",
                    self.product, ask, fair, self.config.min_spread, qty
                );
                orders.push(Order::buy(&self.product, ask, qty));
            }
        }

        if let Some((bid, volume)) = book.best_bid()
            && bid > fair + self.config.min_spread
        {
            let qty = clamp_sell(limit, position, volume);
            if qty > 0 {
                info!(
                    "[Basket] SELL {}: bid={} > fair={} + {}, qty={}",
                    self.product, bid, fair, self.config.min_spread, qty
                );
                orders.push(Order::sell(&self.product, bid, qty));
            }
        }

        orders
    }
}

impl Strategy for BasketArbitrageur {
    fn name(&self) -> &str {
        "BasketArbitrageur"
    }

    fn product(&self) -> &str {
        &self.product
    }

    fn on_tick(&self, ctx: &mut StrategyContext<'_>) -> Vec<Order> {
        let Some(fair) = self.fair_value(ctx) else {
            return Vec::new();
        };
        match ctx.book(&self.product) {
            Some(book) => self.evaluate(book, fair, ctx.position(&self.product)),
            None => Vec::new(),
        }
    }
}
