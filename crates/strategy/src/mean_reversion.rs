//! Mean Reversion Taker Strategy
//!
//! Trades a product against a static statistical anchor (mean, std):
//! - Buys at the best ask when the mid is far below the mean
//! - Sells at the best bid when the mid is far above the mean
//! - Flattens the whole position once the mid is back near the mean
//!
//! Long/short/flat is read from the caller's position every tick; nothing is
//! remembered between ticks.

use crate::error::{ConfigError, ConfigResult};
use crate::signal;
use crate::strategy::{Strategy, StrategyContext};
use log::{debug, info};
use meridian_core::{Order, OrderBookSnapshot, Side};
use meridian_risk::clamp;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Configuration for mean reversion taker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeanReversionConfig {
    /// Historical mean price
    pub mean: Decimal,
    /// Historical standard deviation (must be positive)
    pub std: Decimal,
    /// |z| beyond which a position is opened
    pub entry_z: Decimal,
    /// |z| within which an open position is closed
    pub exit_z: Decimal,
    /// Maximum position size (absolute value)
    pub limit: i64,
    /// Size to trade on a normal entry signal
    #[serde(default = "default_base_size")]
    pub base_size: i64,
    /// Size to trade when |z| exceeds `extreme_z`
    #[serde(default = "default_extreme_size")]
    pub extreme_size: i64,
    #[serde(default = "default_extreme_z")]
    pub extreme_z: Decimal,
}

fn default_base_size() -> i64 {
    10
}

fn default_extreme_size() -> i64 {
    20
}

fn default_extreme_z() -> Decimal {
    dec!(2)
}

impl Default for MeanReversionConfig {
    fn default() -> Self {
        Self {
            mean: dec!(2031),
            std: dec!(1.2),
            entry_z: dec!(1.0),
            exit_z: dec!(0.3),
            limit: 50,
            base_size: default_base_size(),
            extreme_size: default_extreme_size(),
            extreme_z: default_extreme_z(),
        }
    }
}

impl MeanReversionConfig {
    pub fn validate(&self, product: &str) -> ConfigResult<()> {
        if self.std <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveStd {
                product: product.to_string(),
                std: self.std.to_string(),
            });
        }
        if self.exit_z < Decimal::ZERO || self.exit_z >= self.entry_z {
            return Err(ConfigError::InvalidExitBand {
                product: product.to_string(),
                entry_z: self.entry_z.to_string(),
                exit_z: self.exit_z.to_string(),
            });
        }
        if self.extreme_z < self.entry_z {
            return Err(ConfigError::InvalidExtremeThreshold {
                product: product.to_string(),
                entry_z: self.entry_z.to_string(),
                extreme_z: self.extreme_z.to_string(),
            });
        }
        if self.limit <= 0 {
            return Err(ConfigError::NonPositiveLimit {
                product: product.to_string(),
                limit: self.limit,
            });
        }
        for size in [self.base_size, self.extreme_size] {
            if size <= 0 {
                return Err(ConfigError::NonPositiveSize {
                    product: product.to_string(),
                    size,
                });
            }
        }
        Ok(())
    }

    /// Entry size before clamping: scaled up for extreme deviations
    pub fn entry_size(&self, z: Decimal) -> i64 {
        if z.abs() > self.extreme_z {
            self.extreme_size
        } else {
            self.base_size
        }
    }

    /// Three-zone decision for a z-score
    pub fn classify(&self, z: Decimal) -> Zone {
        if z < -self.entry_z {
            Zone::Enter(Side::Buy)
        } else if z > self.entry_z {
            Zone::Enter(Side::Sell)
        } else if z.abs() <= self.exit_z {
            Zone::Exit
        } else {
            Zone::Hold
        }
    }
}

/// Which band of the three-zone rule a z-score falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// Beyond the entry threshold: open in this direction
    Enter(Side),
    /// Inside the exit band: flatten
    Exit,
    /// Between exit band and entry threshold
    Hold,
}

/// Mean reversion taker strategy
pub struct MeanReversionTaker {
    product: String,
    config: MeanReversionConfig,
}

impl MeanReversionTaker {
    /// Create a new mean reversion taker
    pub fn new(product: impl Into<String>, config: MeanReversionConfig) -> Self {
        Self {
            product: product.into(),
            config,
        }
    }

    pub fn config(&self) -> &MeanReversionConfig {
        &self.config
    }

    /// Decide this tick's orders from the book and current position
    pub fn evaluate(&self, book: &OrderBookSnapshot, position: i64) -> Vec<Order> {
        let (Some((best_bid, _)), Some((best_ask, _))) = (book.best_bid(), book.best_ask()) else {
            debug!("[MeanReversion] {}: no mid price, skipping", self.product);
            return Vec::new();
        };
        let mid = (best_bid + best_ask) / Decimal::TWO;
        let z = signal::z_score(mid, self.config.mean, self.config.std);

        match self.config.classify(z) {
            Zone::Enter(side) => {
                let requested = self.config.entry_size(z);
                let qty = clamp(side, self.config.limit, position, requested);
                if qty == 0 {
                    debug!(
                        "[MeanReversion] {}: {:?} signal at z={:.3} but no headroom (position={})",
                        self.product, side, z, position
                    );
                    return Vec::new();
                }
                info!(
                    "[MeanReversion] {:?} signal: {} z={:.3}, mid={}, qty={}",
                    side, self.product, z, mid, qty
                );
                let price = match side {
                    Side::Buy => best_ask,
                    Side::Sell => best_bid,
                };
                vec![Order::with_side(&self.product, side, price, qty)]
            }
            Zone::Exit if position > 0 => {
                info!(
                    "[MeanReversion] EXIT signal: {} closing long {}, z={:.3}",
                    self.product, position, z
                );
                vec![Order::sell(&self.product, best_bid, position)]
            }
            Zone::Exit if position < 0 => {
                info!(
                    "[MeanReversion] EXIT signal: {} covering short {}, z={:.3}",
                    self.product, position, z
                );
                vec![Order::buy(&self.product, best_ask, -position)]
            }
            Zone::Exit | Zone::Hold => Vec::new(),
        }
    }
}

impl Strategy for MeanReversionTaker {
    fn name(&self) -> &str {
        "MeanReversionTaker"
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

#[cfg(test)]
mod tests {
    use super::*;

    fn kelp() -> MeanReversionTaker {
        MeanReversionTaker::new("KELP", MeanReversionConfig::default())
    }

    fn book(bid: Decimal, ask: Decimal) -> OrderBookSnapshot {
        OrderBookSnapshot::new().with_bid(bid, 30).with_ask(ask, 30)
    }

    #[test]
    fn test_config_defaults() {
        let config = MeanReversionConfig::default();
        assert_eq!(config.base_size, 10);
        assert_eq!(config.extreme_size, 20);
        assert!(config.validate("KELP").is_ok());
    }

    #[test]
    fn test_rejects_non_positive_std() {
        let config = MeanReversionConfig {
            std: Decimal::ZERO,
            ..Default::default()
        };
        assert!(matches!(
            config.validate("KELP"),
            Err(ConfigError::NonPositiveStd { .. })
        ));
    }

    #[test]
    fn test_rejects_exit_band_wider_than_entry() {
        let config = MeanReversionConfig {
            exit_z: dec!(1.5),
            ..Default::default()
        };
        assert!(matches!(
            config.validate("KELP"),
            Err(ConfigError::InvalidExitBand { .. })
        ));
    }

    #[test]
    fn test_rejects_extreme_threshold_below_entry() {
        for extreme_z in [dec!(-1), dec!(0.5)] {
            let config = MeanReversionConfig {
                extreme_z,
                ..Default::default()
            };
            assert!(matches!(
                config.validate("KELP"),
                Err(ConfigError::InvalidExtremeThreshold { .. })
            ));
        }

        // Equal to entry: every entry is extreme-sized, still valid
        let config = MeanReversionConfig {
            extreme_z: dec!(1.0),
            ..Default::default()
        };
        assert!(config.validate("KELP").is_ok());
        assert_eq!(config.entry_size(dec!(1.2)), 20);
    }

    #[test]
    fn test_classify_zones() {
        let config = MeanReversionConfig::default();
        assert_eq!(config.classify(dec!(-1.01)), Zone::Enter(Side::Buy));
        assert_eq!(config.classify(dec!(1.01)), Zone::Enter(Side::Sell));
        assert_eq!(config.classify(dec!(0.3)), Zone::Exit);
        assert_eq!(config.classify(dec!(-0.3)), Zone::Exit);
        assert_eq!(config.classify(dec!(0.5)), Zone::Hold);
        assert_eq!(config.classify(dec!(-1.0)), Zone::Hold);
    }

    #[test]
    fn test_extreme_deviation_buys_twenty_at_best_ask() {
        // mid 2028.5, z = -2.083
        let orders = kelp().evaluate(&book(dec!(2028), dec!(2029)), 0);
        assert_eq!(orders, vec![Order::buy("KELP", dec!(2029), 20)]);
    }

    #[test]
    fn test_moderate_deviation_sells_base_size_at_best_bid() {
        // mid 2032.5, z = 1.25
        let orders = kelp().evaluate(&book(dec!(2032), dec!(2033)), 0);
        assert_eq!(orders, vec![Order::sell("KELP", dec!(2032), 10)]);
    }

    #[test]
    fn test_entry_clamped_by_headroom() {
        let orders = kelp().evaluate(&book(dec!(2028), dec!(2029)), 42);
        assert_eq!(orders, vec![Order::buy("KELP", dec!(2029), 8)]);

        let orders = kelp().evaluate(&book(dec!(2028), dec!(2029)), 50);
        assert!(orders.is_empty());
    }

    #[test]
    fn test_exit_flattens_long_at_best_bid() {
        // mid 2031.5, z = 0.4167 -> hold; mid 2031.0 -> exit
        assert!(kelp().evaluate(&book(dec!(2031), dec!(2032)), 15).is_empty());

        let orders = kelp().evaluate(&book(dec!(2030.5), dec!(2031.5)), 15);
        assert_eq!(orders, vec![Order::sell("KELP", dec!(2030.5), 15)]);
    }

    #[test]
    fn test_exit_covers_short_at_best_ask() {
        let orders = kelp().evaluate(&book(dec!(2030), dec!(2032)), -33);
        assert_eq!(orders, vec![Order::buy("KELP", dec!(2032), 33)]);
    }

    #[test]
    fn test_flat_inside_exit_band_does_nothing() {
        assert!(kelp().evaluate(&book(dec!(2030), dec!(2032)), 0).is_empty());
    }

    #[test]
    fn test_one_sided_book_does_nothing() {
        let one_sided = OrderBookSnapshot::new().with_ask(dec!(2000), 10);
        assert!(kelp().evaluate(&one_sided, 0).is_empty());
        assert!(kelp().evaluate(&OrderBookSnapshot::new(), 20).is_empty());
    }
}
