use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Order;
use crate::values::Quantity;

/// Net inventory per product, as reported by the caller each tick.
///
/// Absent products are flat. Owned by the caller; the engine only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Positions {
    quantities: HashMap<String, Quantity>,
}

impl Positions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Net position for a product (zero if absent)
    pub fn get(&self, product: &str) -> Quantity {
        self.quantities.get(product).copied().unwrap_or(0)
    }

    /// Overwrite the net position for a product
    pub fn set(&mut self, product: impl Into<String>, quantity: Quantity) {
        self.quantities.insert(product.into(), quantity);
    }

    /// Builder-style variant of [`Positions::set`]
    pub fn with(mut self, product: impl Into<String>, quantity: Quantity) -> Self {
        self.set(product, quantity);
        self
    }

    /// Apply an order as if it were fully filled
    pub fn apply(&mut self, order: &Order) {
        *self.quantities.entry(order.product.clone()).or_insert(0) += order.quantity;
    }
}
