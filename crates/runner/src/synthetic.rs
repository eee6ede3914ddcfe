//! Synthetic Tape - seeded random-walk books
//!
//! Generates layered two-sided books for every configured product so the
//! engine can be soaked without recorded data:
//! - Each product's mid follows an integer random walk
//! - Composite mids track the weighted sum of their constituents plus noise
//! - Levels sit one tick apart outside a fixed half spread
//!
//! Seeded generation reproduces the same tape for the same seed.

use crate::error::{ReplayError, ReplayResult};
use crate::tape::TickRecord;
use meridian_core::{OrderBookSnapshot, Price};
use meridian_strategy::{StrategyConfig, TraderConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

/// How a product's mid evolves
#[derive(Debug, Clone, PartialEq)]
pub enum MidModel {
    /// Independent random walk from a starting mid
    Walk(Price),
    /// Weighted sum of constituent mids
    Composite(Vec<(String, i64)>),
}

/// Configuration for synthetic tape generation
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    pub products: BTreeMap<String, MidModel>,
    /// Largest mid move per tick, in whole price units
    pub max_step: i64,
    /// Largest composite deviation from its synthetic value
    pub composite_noise: i64,
    /// Distance from mid to the best bid and ask
    pub half_spread: Price,
    /// Levels per side
    pub depth: usize,
    /// Largest resting volume per level
    pub max_volume: i64,
    /// Timestamp increment between ticks
    pub tick_interval: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            products: BTreeMap::new(),
            max_step: 2,
            composite_noise: 20,
            half_spread: dec!(1),
            depth: 3,
            max_volume: 30,
            tick_interval: 100,
        }
    }
}

impl SyntheticConfig {
    /// Derive starting mids from a trader configuration: anchored strategies
    /// start at their mean, composites follow their constituents
    pub fn from_trader_config(config: &TraderConfig) -> Self {
        let products = config
            .products
            .iter()
            .map(|(product, strategy)| {
                let model = match strategy {
                    StrategyConfig::MeanReversion(c) => MidModel::Walk(c.mean.round()),
                    StrategyConfig::ThresholdCrossing(c) => MidModel::Walk(c.mean.round()),
                    StrategyConfig::MarketMaking(_) => MidModel::Walk(dec!(10000)),
                    StrategyConfig::BasketArbitrage(c) => MidModel::Composite(
                        c.constituents
                            .iter()
                            .map(|leg| (leg.product.clone(), leg.weight))
                            .collect(),
                    ),
                };
                (product.clone(), model)
            })
            .collect();

        Self {
            products,
            ..Default::default()
        }
    }
}

/// Generates ticks from a [`SyntheticConfig`]
pub struct SyntheticTape {
    config: SyntheticConfig,
    mids: BTreeMap<String, Price>,
    timestamp: u64,
    rng: StdRng,
}

impl SyntheticTape {
    /// Create a generator with a specific seed for reproducible tapes
    pub fn with_seed(config: SyntheticConfig, seed: u64) -> ReplayResult<Self> {
        if config.products.is_empty() {
            return Err(ReplayError::EmptyUniverse);
        }
        let mids = config
            .products
            .iter()
            .filter_map(|(product, model)| match model {
                MidModel::Walk(start) => Some((product.clone(), *start)),
                MidModel::Composite(_) => None,
            })
            .collect();

        Ok(Self {
            config,
            mids,
            timestamp: 0,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Current mid for a walked product
    pub fn mid(&self, product: &str) -> Option<Price> {
        self.mids.get(product).copied()
    }

    /// Generate the next tick
    pub fn next_tick(&mut self) -> TickRecord {
        let Self {
            config,
            mids,
            timestamp,
            rng,
        } = self;

        let floor = config.half_spread + Decimal::from(config.depth as i64);
        for mid in mids.values_mut() {
            let moved = *mid + Decimal::from(rng.gen_range(-config.max_step..=config.max_step));
            *mid = moved.max(floor);
        }

        let mut record = TickRecord::new(*timestamp);
        for (product, model) in &config.products {
            let mid = match model {
                MidModel::Walk(_) => mids.get(product).copied(),
                MidModel::Composite(legs) => composite_mid(legs, mids, config.composite_noise, rng),
            };
            if let Some(mid) = mid {
                record = record.with_book(product.clone(), &layered_book(config, mid, rng));
            }
        }

        *timestamp += config.tick_interval;
        record
    }

    /// Generate `count` ticks
    pub fn take(&mut self, count: usize) -> Vec<TickRecord> {
        (0..count).map(|_| self.next_tick()).collect()
    }
}

fn composite_mid(
    legs: &[(String, i64)],
    mids: &BTreeMap<String, Price>,
    noise: i64,
    rng: &mut StdRng,
) -> Option<Price> {
    let mut total = Decimal::ZERO;
    for (product, weight) in legs {
        total += mids.get(product).copied()? * Decimal::from(*weight);
    }
    Some(total + Decimal::from(rng.gen_range(-noise..=noise)))
}

fn layered_book(config: &SyntheticConfig, mid: Price, rng: &mut StdRng) -> OrderBookSnapshot {
    let mut book = OrderBookSnapshot::new();
    for level in 0..config.depth {
        let offset = config.half_spread + Decimal::from(level as i64);
        book.set_bid((mid - offset).floor(), rng.gen_range(1..=config.max_volume));
        book.set_ask((mid + offset).ceil(), -rng.gen_range(1..=config.max_volume));
    }
    book
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_strategy::load_default_config;

    fn default_tape(seed: u64) -> SyntheticTape {
        let config = SyntheticConfig::from_trader_config(&load_default_config().unwrap());
        SyntheticTape::with_seed(config, seed).unwrap()
    }

    #[test]
    fn test_same_seed_same_tape() {
        assert_eq!(default_tape(7).take(50), default_tape(7).take(50));
    }

    #[test]
    fn test_every_product_quoted() {
        let mut tape = default_tape(1);
        let tick = tape.next_tick();
        assert_eq!(tick.books.len(), 8);
        for record in tick.books.values() {
            let book = record.to_snapshot();
            assert!(book.is_two_sided());
            assert_eq!(book.bid_levels(), 3);
            let (bid, _) = book.best_bid().unwrap();
            let (ask, _) = book.best_ask().unwrap();
            assert!(bid < ask);
        }
    }

    #[test]
    fn test_walk_is_bounded_per_tick() {
        let mut tape = default_tape(3);
        let mut last = tape.mid("KELP").unwrap();
        for _ in 0..200 {
            tape.next_tick();
            let mid = tape.mid("KELP").unwrap();
            assert!((mid - last).abs() <= dec!(2));
            last = mid;
        }
    }

    #[test]
    fn test_timestamps_advance() {
        let ticks = default_tape(0).take(3);
        let stamps: Vec<_> = ticks.iter().map(|t| t.timestamp).collect();
        assert_eq!(stamps, vec![0, 100, 200]);
    }

    #[test]
    fn test_empty_universe_rejected() {
        assert!(matches!(
            SyntheticTape::with_seed(SyntheticConfig::default(), 1),
            Err(ReplayError::EmptyUniverse)
        ));
    }
}
