use log::debug;
use meridian_core::{Quantity, Side};

/// Largest buy that keeps `position + qty <= limit`, floored at zero
#[inline]
pub fn clamp_buy(limit: Quantity, position: Quantity, requested: Quantity) -> Quantity {
    requested.min(limit - position).max(0)
}

/// Largest sell that keeps `position - qty >= -limit`, floored at zero
#[inline]
pub fn clamp_sell(limit: Quantity, position: Quantity, requested: Quantity) -> Quantity {
    requested.min(limit + position).max(0)
}

/// Side-dispatched clamp; returns an unsigned size
#[inline]
pub fn clamp(side: Side, limit: Quantity, position: Quantity, requested: Quantity) -> Quantity {
    match side {
        Side::Buy => clamp_buy(limit, position, requested),
        Side::Sell => clamp_sell(limit, position, requested),
    }
}

/// Running view of a position while several orders are built in one tick.
///
/// Each accepted fill advances the position, so later requests only see the
/// headroom that is left after the earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryCursor {
    limit: Quantity,
    position: Quantity,
}

impl InventoryCursor {
    pub fn new(limit: Quantity, position: Quantity) -> Self {
        Self { limit, position }
    }

    /// Position after all accepted fills so far
    pub fn position(&self) -> Quantity {
        self.position
    }

    /// Remaining buy headroom
    pub fn buy_headroom(&self) -> Quantity {
        clamp_buy(self.limit, self.position, Quantity::MAX)
    }

    /// Remaining sell headroom
    pub fn sell_headroom(&self) -> Quantity {
        clamp_sell(self.limit, self.position, Quantity::MAX)
    }

    /// Clamp a buy request and book it against the running position
    pub fn take_buy(&mut self, requested: Quantity) -> Quantity {
        let qty = clamp_buy(self.limit, self.position, requested);
        if qty < requested {
            debug!(
                "buy clamped: requested={}, granted={}, position={}, limit={}",
                requested, qty, self.position, self.limit
            );
        }
        self.position += qty;
        qty
    }

    /// Clamp a sell request and book it against the running position
    pub fn take_sell(&mut self, requested: Quantity) -> Quantity {
        let qty = clamp_sell(self.limit, self.position, requested);
        if qty < requested {
            debug!(
                "sell clamped: requested={}, granted={}, position={}, limit={}",
                requested, qty, self.position, self.limit
            );
        }
        self.position -= qty;
        qty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_buy_within_headroom() {
        assert_eq!(clamp_buy(50, 0, 20), 20);
        assert_eq!(clamp_buy(50, 40, 20), 10);
        assert_eq!(clamp_buy(50, 50, 20), 0);
    }

    #[test]
    fn test_clamp_buy_from_short_uses_signed_headroom() {
        // Short 40 with limit 50: can buy up to 90
        assert_eq!(clamp_buy(50, -40, 100), 90);
    }

    #[test]
    fn test_clamp_never_negative() {
        // Already over the limit (stale caller position): nothing allowed
        assert_eq!(clamp_buy(50, 60, 10), 0);
        assert_eq!(clamp_sell(50, -60, 10), 0);
        assert_eq!(clamp_buy(50, 0, -5), 0);
    }

    #[test]
    fn test_clamp_sell_symmetric() {
        assert_eq!(clamp_sell(50, 0, 20), 20);
        assert_eq!(clamp_sell(50, -40, 20), 10);
        assert_eq!(clamp_sell(50, 40, 100), 90);
        assert_eq!(clamp(Side::Sell, 50, -50, 1), 0);
        assert_eq!(clamp(Side::Buy, 50, -50, 1), 1);
    }

    #[test]
    fn test_limit_invariant_holds_for_all_inputs() {
        let limit = 20;
        for position in -limit..=limit {
            for requested in 0..=50 {
                let buy = clamp_buy(limit, position, requested);
                let sell = clamp_sell(limit, position, requested);
                assert!((position + buy).abs() <= limit);
                assert!((position - sell).abs() <= limit);
                assert!(buy <= requested && sell <= requested);
            }
        }
    }

    #[test]
    fn test_cursor_accumulates() {
        let mut cursor = InventoryCursor::new(50, 10);
        assert_eq!(cursor.buy_headroom(), 40);
        assert_eq!(cursor.take_buy(30), 30);
        assert_eq!(cursor.take_buy(30), 10);
        assert_eq!(cursor.take_buy(5), 0);
        assert_eq!(cursor.position(), 50);

        assert_eq!(cursor.sell_headroom(), 100);
        assert_eq!(cursor.take_sell(120), 100);
        assert_eq!(cursor.position(), -50);
    }
}
