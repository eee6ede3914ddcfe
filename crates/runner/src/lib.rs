//! Meridian Runner - Replay Harness
//!
//! Drives the decision engine outside the exchange:
//!
//! - **Tape**: JSON-lines tick records, read and written
//! - **Replay**: one engine call per tick, every order filled in full
//! - **Synthetic**: seeded random-walk books for the configured universe
//!
//! ## Architecture
//!
//! ```text
//!   tape file ──┐
//!               ├──► TickRecord ──► ReplaySimulation ──► Trader::run
//!   synthetic ──┘                        │   ▲                │
//!                                        │   └── positions ◄──┘ full fills
//!                                        ▼
//!                                  ReplayResults
//! ```

pub mod error;
pub mod replay;
pub mod synthetic;
pub mod tape;

// Re-export main types
pub use error::{ReplayError, ReplayResult};
pub use replay::{LimitBreach, ProductStats, ReplayResults, ReplaySimulation};
pub use synthetic::{MidModel, SyntheticConfig, SyntheticTape};
pub use tape::{BookRecord, TickRecord, parse_tape, read_tape, write_tape};
