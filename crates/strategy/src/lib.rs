//! Meridian Strategy Engine
//!
//! A per-tick decision engine for a simulated multi-product exchange:
//! - Fair value signals (static anchors, smoothed basket valuations)
//! - A configuration-driven registry with one strategy per product
//! - Mean reversion, threshold sweeping, basket arbitrage and market making
//! - Limit-aware sizing through `meridian-risk`
//!
//! ## Architecture
//!
//! ```text
//!   TradingState ──► Trader::run ──► for each configured product
//!   (books,                              │
//!    positions,                          ▼
//!    token)                   ┌─────────────────────┐
//!                             │  Strategy (by tag)  │◄── FairValueHistory
//!                             └──────────┬──────────┘    (composites only)
//!                                        │ clamp
//!                                        ▼
//!                                  meridian-risk
//!                                        │
//!                                        ▼
//!                          TickOutput { orders, conversions, token }
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use meridian_strategy::{Trader, load_default_config};
//!
//! let mut trader = Trader::new(load_default_config()?)?;
//! let output = trader.run(&state);
//! ```

pub mod basket;
pub mod config;
pub mod error;
pub mod history;
pub mod loader;
pub mod market_maker;
pub mod mean_reversion;
pub mod signal;
pub mod strategy;
pub mod threshold;
pub mod trader;

// Re-export main types
pub use basket::{BasketArbitrageur, BasketConfig};
pub use config::{StrategyConfig, TraderConfig};
pub use error::{ConfigError, ConfigResult};
pub use history::{DEFAULT_WINDOW, FairValueHistory, SmoothingWindow};
pub use loader::{load_config, load_config_from_str, load_default_config};
pub use market_maker::{BasicMarketMaker, MarketMakerConfig};
pub use mean_reversion::{MeanReversionConfig, MeanReversionTaker, Zone};
pub use signal::{Constituent, MissingLegPolicy};
pub use strategy::{Strategy, StrategyContext};
pub use threshold::{ThresholdConfig, ThresholdSweeper};
pub use trader::{TickOutput, Trader};
