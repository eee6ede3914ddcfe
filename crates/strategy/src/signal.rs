//! Price Signal Estimator
//!
//! Fair-value building blocks shared by the strategies:
//! - mid price of a two-sided book
//! - z-score against a static statistical anchor
//! - synthetic value of a weighted basket of constituents
//!
//! Smoothing of synthetic values lives in [`crate::history`].

use log::debug;
use meridian_core::{OrderBookSnapshot, Price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One leg of a composite: `weight` units of `product` per unit of composite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constituent {
    pub product: String,
    pub weight: i64,
}

impl Constituent {
    pub fn new(product: impl Into<String>, weight: i64) -> Self {
        Self {
            product: product.into(),
            weight,
        }
    }
}

/// What to do when a constituent has no mid price this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingLegPolicy {
    /// The missing leg contributes zero; the composite value is biased low
    Zero,
    /// No synthetic value this tick
    #[default]
    Skip,
}

/// Mid price, or `None` for a one-sided or empty book
pub fn mid_price(book: &OrderBookSnapshot) -> Option<Price> {
    book.mid_price()
}

/// Signed number of standard deviations `mid` sits from `mean`.
///
/// `std` must be positive; configuration validation guarantees it.
pub fn z_score(mid: Price, mean: Decimal, std: Decimal) -> Decimal {
    debug_assert!(std > Decimal::ZERO, "z_score called with non-positive std");
    (mid - mean) / std
}

/// Weighted sum of constituent mids.
///
/// `mid_of` resolves a constituent's mid for this tick. Returns `None` only
/// under [`MissingLegPolicy::Skip`] when some leg has no mid.
pub fn synthetic_value<F>(
    constituents: &[Constituent],
    mid_of: F,
    policy: MissingLegPolicy,
) -> Option<Price>
where
    F: Fn(&str) -> Option<Price>,
{
    let mut value = Decimal::ZERO;
    for leg in constituents {
        match mid_of(&leg.product) {
            Some(mid) => value += Decimal::from(leg.weight) * mid,
            None => match policy {
                MissingLegPolicy::Zero => {
                    debug!("synthetic value: {} has no mid, counting as zero", leg.product);
                }
                MissingLegPolicy::Skip => {
                    debug!("synthetic value: {} has no mid, no signal", leg.product);
                    return None;
                }
            },
        }
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn basket() -> Vec<Constituent> {
        vec![
            Constituent::new("CROISSANTS", 6),
            Constituent::new("JAMS", 3),
            Constituent::new("DJEMBES", 1),
        ]
    }

    #[test]
    fn test_mid_price_requires_both_sides() {
        let book = OrderBookSnapshot::new()
            .with_bid(dec!(2028), 5)
            .with_ask(dec!(2029), 5);
        assert_eq!(mid_price(&book), Some(dec!(2028.5)));
        assert_eq!(mid_price(&OrderBookSnapshot::new().with_ask(dec!(1), 1)), None);
    }

    #[test]
    fn test_z_score() {
        // (2028.5 - 2031) / 1.2 = -2.0833...
        let z = z_score(dec!(2028.5), dec!(2031), dec!(1.2));
        assert!(z < dec!(-2.08) && z > dec!(-2.09));
        assert_eq!(z_score(dec!(2031), dec!(2031), dec!(1.2)), Decimal::ZERO);
    }

    #[test]
    fn test_synthetic_value_weighted_sum() {
        let mids: HashMap<&str, Price> = [
            ("CROISSANTS", dec!(100)),
            ("JAMS", dec!(200)),
            ("DJEMBES", dec!(50)),
        ]
        .into_iter()
        .collect();

        let value = synthetic_value(&basket(), |p| mids.get(p).copied(), MissingLegPolicy::Skip);
        assert_eq!(value, Some(dec!(1250)));
    }

    #[test]
    fn test_missing_leg_policies() {
        let mids: HashMap<&str, Price> = [("CROISSANTS", dec!(100)), ("JAMS", dec!(200))]
            .into_iter()
            .collect();

        let zero = synthetic_value(&basket(), |p| mids.get(p).copied(), MissingLegPolicy::Zero);
        assert_eq!(zero, Some(dec!(1200)));

        let skip = synthetic_value(&basket(), |p| mids.get(p).copied(), MissingLegPolicy::Skip);
        assert_eq!(skip, None);
    }

    #[test]
    fn test_default_policy_is_skip() {
        assert_eq!(MissingLegPolicy::default(), MissingLegPolicy::Skip);
    }
}
