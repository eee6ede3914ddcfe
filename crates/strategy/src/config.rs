//! Strategy registry configuration
//!
//! Maps each traded product to exactly one tagged strategy variant with its
//! own parameters. Products absent from the map are never traded.

use crate::basket::{BasketArbitrageur, BasketConfig};
use crate::error::{ConfigError, ConfigResult};
use crate::history::DEFAULT_WINDOW;
use crate::market_maker::{BasicMarketMaker, MarketMakerConfig};
use crate::mean_reversion::{MeanReversionConfig, MeanReversionTaker};
use crate::strategy::Strategy;
use crate::threshold::{ThresholdConfig, ThresholdSweeper};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-product strategy selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum StrategyConfig {
    MeanReversion(MeanReversionConfig),
    ThresholdCrossing(ThresholdConfig),
    BasketArbitrage(BasketConfig),
    MarketMaking(MarketMakerConfig),
}

impl StrategyConfig {
    /// Symmetric inventory limit for the product
    pub fn limit(&self) -> i64 {
        match self {
            StrategyConfig::MeanReversion(c) => c.limit,
            StrategyConfig::ThresholdCrossing(c) => c.limit,
            StrategyConfig::BasketArbitrage(c) => c.limit,
            StrategyConfig::MarketMaking(c) => c.limit,
        }
    }

    /// Tag used in configuration files
    pub fn kind(&self) -> &'static str {
        match self {
            StrategyConfig::MeanReversion(_) => "mean_reversion",
            StrategyConfig::ThresholdCrossing(_) => "threshold_crossing",
            StrategyConfig::BasketArbitrage(_) => "basket_arbitrage",
            StrategyConfig::MarketMaking(_) => "market_making",
        }
    }

    pub fn validate(&self, product: &str) -> ConfigResult<()> {
        match self {
            StrategyConfig::MeanReversion(c) => c.validate(product),
            StrategyConfig::ThresholdCrossing(c) => c.validate(product),
            StrategyConfig::BasketArbitrage(c) => c.validate(product),
            StrategyConfig::MarketMaking(c) => c.validate(product),
        }
    }

    /// Instantiate the strategy for a product
    pub fn build(&self, product: &str) -> Box<dyn Strategy> {
        match self {
            StrategyConfig::MeanReversion(c) => {
                Box::new(MeanReversionTaker::new(product, c.clone()))
            }
            StrategyConfig::ThresholdCrossing(c) => {
                Box::new(ThresholdSweeper::new(product, c.clone()))
            }
            StrategyConfig::BasketArbitrage(c) => {
                Box::new(BasketArbitrageur::new(product, c.clone()))
            }
            StrategyConfig::MarketMaking(c) => {
                Box::new(BasicMarketMaker::new(product, c.clone()))
            }
        }
    }
}

/// Full engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraderConfig {
    /// Synthetic values kept per composite for smoothing
    #[serde(default = "default_smoothing_window")]
    pub smoothing_window: usize,
    /// Product -> strategy
    #[serde(default)]
    pub products: BTreeMap<String, StrategyConfig>,
}

fn default_smoothing_window() -> usize {
    DEFAULT_WINDOW
}

impl Default for TraderConfig {
    fn default() -> Self {
        Self {
            smoothing_window: DEFAULT_WINDOW,
            products: BTreeMap::new(),
        }
    }
}

impl TraderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style product registration (replaces any earlier entry)
    pub fn with_product(mut self, product: impl Into<String>, strategy: StrategyConfig) -> Self {
        self.products.insert(product.into(), strategy);
        self
    }

    pub fn with_smoothing_window(mut self, window: usize) -> Self {
        self.smoothing_window = window;
        self
    }

    pub fn strategy(&self, product: &str) -> Option<&StrategyConfig> {
        self.products.get(product)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.smoothing_window == 0 {
            return Err(ConfigError::InvalidWindow);
        }
        for (product, strategy) in &self.products {
            strategy.validate(product)?;
            if let StrategyConfig::BasketArbitrage(basket) = strategy {
                for leg in &basket.constituents {
                    if !self.products.contains_key(&leg.product) {
                        // Legs only need a book, not a strategy of their own
                        warn!(
                            "{}: constituent {} is not a traded product",
                            product, leg.product
                        );
                    }
                }
            }
        }
        Ok(())
    }
}
