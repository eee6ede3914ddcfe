//! Tick tapes
//!
//! A tape is a JSON-lines file, one [`TickRecord`] per line:
//!
//! ```text
//! {"timestamp":100,"books":{"KELP":{"bids":[[2030,12]],"asks":[[2032,-12]]}}}
//! ```
//!
//! Ask volumes may be written negative, as exchange feeds often do; they are
//! normalized when the record becomes an [`OrderBookSnapshot`].

use crate::error::{ReplayError, ReplayResult};
use meridian_core::{OrderBookSnapshot, Positions, Price, Quantity, TradingState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Price levels for one product on one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(default)]
    pub bids: Vec<(Price, Quantity)>,
    #[serde(default)]
    pub asks: Vec<(Price, Quantity)>,
}

impl BookRecord {
    pub fn to_snapshot(&self) -> OrderBookSnapshot {
        OrderBookSnapshot::from_levels(self.bids.iter().copied(), self.asks.iter().copied())
    }
}

impl From<&OrderBookSnapshot> for BookRecord {
    fn from(book: &OrderBookSnapshot) -> Self {
        Self {
            bids: book.bids_descending().collect(),
            asks: book.asks_ascending().map(|(p, q)| (p, -q)).collect(),
        }
    }
}

/// One tick of market data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    pub timestamp: u64,
    pub books: BTreeMap<String, BookRecord>,
}

impl TickRecord {
    pub fn new(timestamp: u64) -> Self {
        Self {
            timestamp,
            books: BTreeMap::new(),
        }
    }

    pub fn with_book(mut self, product: impl Into<String>, book: &OrderBookSnapshot) -> Self {
        self.books.insert(product.into(), BookRecord::from(book));
        self
    }

    /// Build the engine input for this tick from the harness-owned state
    pub fn to_state(&self, positions: &Positions, trader_data: &str) -> TradingState {
        TradingState {
            books: self
                .books
                .iter()
                .map(|(product, book)| (product.clone(), book.to_snapshot()))
                .collect(),
            positions: positions.clone(),
            trader_data: trader_data.to_string(),
        }
    }
}

/// Parse a tape from any buffered reader; blank lines are ignored
pub fn parse_tape<R: BufRead>(reader: R) -> ReplayResult<Vec<TickRecord>> {
    let mut ticks = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| ReplayError::Tape {
            line: index + 1,
            source,
        })?;
        ticks.push(record);
    }
    Ok(ticks)
}

/// Read a tape from a JSON-lines file
pub fn read_tape<P: AsRef<Path>>(path: P) -> ReplayResult<Vec<TickRecord>> {
    let file = File::open(path)?;
    parse_tape(BufReader::new(file))
}

/// Write ticks as JSON lines
pub fn write_tape<P: AsRef<Path>>(path: P, ticks: &[TickRecord]) -> ReplayResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for tick in ticks {
        serde_json::to_writer(&mut writer, tick)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_numeric_levels() {
        let tape = r#"{"timestamp":0,"books":{"KELP":{"bids":[[2030,12],[2029,5]],"asks":[[2032,-12]]}}}

{"timestamp":100,"books":{}}
"#;
        let ticks = parse_tape(tape.as_bytes()).unwrap();
        assert_eq!(ticks.len(), 2);

        let book = ticks[0].books["KELP"].to_snapshot();
        assert_eq!(book.best_bid(), Some((dec!(2030), 12)));
        assert_eq!(book.best_ask(), Some((dec!(2032), 12)));
        assert_eq!(book.bid_levels(), 2);
        assert!(ticks[1].books.is_empty());
    }

    #[test]
    fn test_one_sided_book_record() {
        let tape = r#"{"timestamp":5,"books":{"PICNIC_BASKET1":{"asks":[[1200,-70]]}}}"#;
        let ticks = parse_tape(tape.as_bytes()).unwrap();
        let book = ticks[0].books["PICNIC_BASKET1"].to_snapshot();
        assert_eq!(book.best_bid(), None);
        assert_eq!(book.best_ask(), Some((dec!(1200), 70)));
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let tape = "{\"timestamp\":0,\"books\":{}}\nnot json\n";
        match parse_tape(tape.as_bytes()) {
            Err(ReplayError::Tape { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected tape error, got {:?}", other),
        }
    }

    #[test]
    fn test_to_state_carries_positions_and_token() {
        let book = OrderBookSnapshot::new()
            .with_bid(dec!(99), 3)
            .with_ask(dec!(101), 4);
        let record = TickRecord::new(7).with_book("A", &book);
        let positions = Positions::new().with("A", -3);

        let state = record.to_state(&positions, "token");
        assert_eq!(state.book("A"), Some(&book));
        assert_eq!(state.position("A"), -3);
        assert_eq!(state.trader_data, "token");
    }
}
