//! Tick entry point
//!
//! [`Trader`] owns the strategy registry and the smoothing history. Each call
//! to [`Trader::run`] evaluates every configured product against one
//! snapshot and returns the orders to submit.

use crate::config::TraderConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::history::FairValueHistory;
use crate::strategy::{Strategy, StrategyContext};
use log::debug;
use meridian_core::{Order, TradingState};
use std::collections::BTreeMap;

/// Result of one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutput {
    /// Orders per product, in the sequence they should be applied
    pub orders: BTreeMap<String, Vec<Order>>,
    /// Conversion requests (never used by this engine)
    pub conversions: i64,
    /// Continuation token for the next tick
    pub trader_data: String,
}

impl TickOutput {
    /// Orders for a product (empty if none)
    pub fn orders_for(&self, product: &str) -> &[Order] {
        self.orders.get(product).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All orders across products
    pub fn all_orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values().flatten()
    }

    pub fn order_count(&self) -> usize {
        self.orders.values().map(Vec::len).sum()
    }
}

/// Per-tick decision engine
pub struct Trader {
    config: TraderConfig,
    strategies: Vec<Box<dyn Strategy>>,
    history: FairValueHistory,
}

impl Trader {
    /// Validate the configuration and build the strategy registry
    pub fn new(config: TraderConfig) -> ConfigResult<Self> {
        let history = FairValueHistory::new(config.smoothing_window);
        Self::with_history(config, history)
    }

    /// Start from a prior smoothing history; its window must match the configured one
    pub fn with_history(config: TraderConfig, history: FairValueHistory) -> ConfigResult<Self> {
        config.validate()?;
        if history.window_size() != config.smoothing_window {
            return Err(ConfigError::WindowMismatch {
                configured: config.smoothing_window,
                supplied: history.window_size(),
            });
        }

        let strategies = config
            .products
            .iter()
            .map(|(product, strategy)| strategy.build(product))
            .collect();

        Ok(Self {
            config,
            strategies,
            history,
        })
    }

    pub fn config(&self) -> &TraderConfig {
        &self.config
    }

    /// Current smoothing state
    pub fn history(&self) -> &FairValueHistory {
        &self.history
    }

    /// Evaluate one tick.
    ///
    /// Every configured product with a book this tick gets an entry in the
    /// output (possibly empty). Composite valuations are recorded even when
    /// the composite has no book.
    pub fn run(&mut self, state: &TradingState) -> TickOutput {
        let mut output = TickOutput {
            trader_data: state.trader_data.clone(),
            ..Default::default()
        };

        for product in state.books.keys() {
            if !self.config.products.contains_key(product) {
                debug!("{}: not configured, skipping", product);
            }
        }

        for strategy in &self.strategies {
            let mut ctx = StrategyContext::new(state, &mut self.history);
            let orders = strategy.on_tick(&mut ctx);
            if state.book(strategy.product()).is_some() {
                output.orders.insert(strategy.product().to_string(), orders);
            }
        }

        debug!(
            "tick done: {} orders across {} products",
            output.order_count(),
            output.orders.len()
        );
        output
    }
}
