//! Replay - drive the engine over a tape
//!
//! The harness owns what the exchange would own in a live run: it keeps the
//! positions, hands the engine one snapshot per tick, and treats every
//! emitted order as fully filled before the next tick. Results track
//! per-product activity and any tick where a position ended beyond its limit.

use crate::error::ReplayResult;
use crate::tape::TickRecord;
use log::{debug, error, info};
use meridian_core::Positions;
use meridian_strategy::{TickOutput, Trader, TraderConfig};
use std::collections::BTreeMap;

/// Activity for one product over a replay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductStats {
    /// Orders emitted
    pub orders: u64,
    pub buys: u64,
    pub sells: u64,
    /// Sum of order sizes
    pub volume: i64,
    pub final_position: i64,
    /// Largest absolute position reached
    pub peak_position: i64,
}

/// A position observed beyond its configured limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitBreach {
    pub timestamp: u64,
    pub product: String,
    pub position: i64,
    pub limit: i64,
}

/// Replay summary
#[derive(Debug, Clone, Default)]
pub struct ReplayResults {
    pub ticks: u64,
    pub total_orders: u64,
    pub products: BTreeMap<String, ProductStats>,
    pub breaches: Vec<LimitBreach>,
}

impl ReplayResults {
    pub fn has_breach(&self) -> bool {
        !self.breaches.is_empty()
    }

    pub fn stats(&self, product: &str) -> Option<&ProductStats> {
        self.products.get(product)
    }
}

/// Tick-by-tick replay with full-fill position tracking
pub struct ReplaySimulation {
    trader: Trader,
    positions: Positions,
    limits: BTreeMap<String, i64>,
    trader_data: String,
    results: ReplayResults,
}

impl ReplaySimulation {
    /// Create a replay starting flat
    pub fn new(config: TraderConfig) -> ReplayResult<Self> {
        Self::with_positions(config, Positions::new())
    }

    /// Create a replay from existing positions
    pub fn with_positions(config: TraderConfig, positions: Positions) -> ReplayResult<Self> {
        let limits = config
            .products
            .iter()
            .map(|(product, strategy)| (product.clone(), strategy.limit()))
            .collect();
        let trader = Trader::new(config)?;

        Ok(Self {
            trader,
            positions,
            limits,
            trader_data: String::new(),
            results: ReplayResults::default(),
        })
    }

    pub fn positions(&self) -> &Positions {
        &self.positions
    }

    pub fn trader(&self) -> &Trader {
        &self.trader
    }

    pub fn results(&self) -> &ReplayResults {
        &self.results
    }

    /// Run the engine on one tick and fill everything it emits
    pub fn step(&mut self, tick: &TickRecord) -> TickOutput {
        let state = tick.to_state(&self.positions, &self.trader_data);
        let output = self.trader.run(&state);
        self.trader_data = output.trader_data.clone();

        for (product, orders) in &output.orders {
            let stats = self.results.products.entry(product.clone()).or_default();
            for order in orders {
                self.positions.apply(order);
                debug!(
                    "t={}: filled {:?} {} {}@{}",
                    tick.timestamp,
                    order.side(),
                    product,
                    order.size(),
                    order.price
                );
                stats.orders += 1;
                if order.is_buy() {
                    stats.buys += 1;
                } else if order.is_sell() {
                    stats.sells += 1;
                }
                stats.volume += order.size();
            }

            let position = self.positions.get(product);
            stats.final_position = position;
            stats.peak_position = stats.peak_position.max(position.abs());

            if let Some(&limit) = self.limits.get(product)
                && position.abs() > limit
            {
                error!(
                    "{} position {} beyond limit {} at t={}",
                    product, position, limit, tick.timestamp
                );
                self.results.breaches.push(LimitBreach {
                    timestamp: tick.timestamp,
                    product: product.clone(),
                    position,
                    limit,
                });
            }
        }

        self.results.ticks += 1;
        self.results.total_orders += output.order_count() as u64;
        debug!(
            "t={}: {} orders filled",
            tick.timestamp,
            output.order_count()
        );
        output
    }

    /// Replay a sequence of ticks and return the summary
    pub fn run<'a>(&mut self, ticks: impl IntoIterator<Item = &'a TickRecord>) -> ReplayResults {
        for tick in ticks {
            self.step(tick);
        }

        info!(
            "Replay finished: {} ticks, {} orders, {} breaches",
            self.results.ticks,
            self.results.total_orders,
            self.results.breaches.len()
        );
        self.results.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_core::OrderBookSnapshot;
    use meridian_strategy::{MeanReversionConfig, StrategyConfig};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn kelp_config() -> TraderConfig {
        TraderConfig::new().with_product(
            "KELP",
            StrategyConfig::MeanReversion(MeanReversionConfig::default()),
        )
    }

    fn kelp_tick(timestamp: u64, bid: Decimal, ask: Decimal) -> TickRecord {
        let book = OrderBookSnapshot::new().with_bid(bid, 30).with_ask(ask, -30);
        TickRecord::new(timestamp).with_book("KELP", &book)
    }

    #[test]
    fn test_orders_fill_into_positions() {
        let mut sim = ReplaySimulation::new(kelp_config()).unwrap();

        // z = -2.08: buy 20
        sim.step(&kelp_tick(0, dec!(2028), dec!(2029)));
        assert_eq!(sim.positions().get("KELP"), 20);

        // back at the mean: flatten
        sim.step(&kelp_tick(100, dec!(2030), dec!(2032)));
        assert_eq!(sim.positions().get("KELP"), 0);

        let stats = sim.results().stats("KELP").unwrap();
        assert_eq!(stats.orders, 2);
        assert_eq!((stats.buys, stats.sells), (1, 1));
        assert_eq!(stats.volume, 40);
        assert_eq!(stats.peak_position, 20);
        assert_eq!(stats.final_position, 0);
    }

    #[test]
    fn test_repeated_signal_stops_at_limit() {
        let mut sim = ReplaySimulation::new(kelp_config()).unwrap();
        let ticks: Vec<_> = (0..5)
            .map(|i| kelp_tick(i * 100, dec!(2028), dec!(2029)))
            .collect();

        let results = sim.run(&ticks);
        assert_eq!(sim.positions().get("KELP"), 50);
        assert_eq!(results.ticks, 5);
        // 20 + 20 + 10, then no headroom
        assert_eq!(results.total_orders, 3);
        assert!(!results.has_breach());
    }

    #[test]
    fn test_starting_position_beyond_limit_is_flagged() {
        let positions = Positions::new().with("KELP", 70);
        let mut sim = ReplaySimulation::with_positions(kelp_config(), positions).unwrap();

        // Exit zone flattens the whole position in one order
        sim.step(&kelp_tick(0, dec!(2030), dec!(2032)));
        assert_eq!(sim.positions().get("KELP"), 0);
        assert!(!sim.results().has_breach());

        // Hold zone leaves the over-limit position in place
        let mut sim =
            ReplaySimulation::with_positions(kelp_config(), Positions::new().with("KELP", 70))
                .unwrap();
        sim.step(&kelp_tick(0, dec!(2031), dec!(2033)));
        assert_eq!(sim.positions().get("KELP"), 70);
        assert!(sim.results().has_breach());
    }

    #[test]
    fn test_trader_data_carried_between_ticks() {
        let mut sim = ReplaySimulation::new(kelp_config()).unwrap();
        let output = sim.step(&kelp_tick(0, dec!(2030), dec!(2032)));
        assert_eq!(output.trader_data, "");
        assert_eq!(output.conversions, 0);
    }
}
