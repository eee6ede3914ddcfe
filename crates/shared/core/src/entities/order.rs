use serde::{Deserialize, Serialize};

use super::Side;
use crate::values::{Price, ProductId, Quantity};

/// An order emitted by the engine.
///
/// The quantity is signed: positive buys, negative sells. Orders are never
/// mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// The product being traded
    pub product: ProductId,
    pub price: Price,
    pub quantity: Quantity,
}

impl Order {
    /// Create an order from a signed quantity
    pub fn new(product: impl Into<ProductId>, price: Price, quantity: Quantity) -> Self {
        Self {
            product: product.into(),
            price,
            quantity,
        }
    }

    /// Create an order for `quantity` units (magnitude) on `side`
    pub fn with_side(
        product: impl Into<ProductId>,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self::new(product, price, side.sign() * quantity.abs())
    }

    /// Create a buy order for `quantity` units (magnitude)
    pub fn buy(product: impl Into<ProductId>, price: Price, quantity: Quantity) -> Self {
        Self::with_side(product, Side::Buy, price, quantity)
    }

    /// Create a sell order for `quantity` units (magnitude)
    pub fn sell(product: impl Into<ProductId>, price: Price, quantity: Quantity) -> Self {
        Self::with_side(product, Side::Sell, price, quantity)
    }

    pub fn side(&self) -> Side {
        if self.quantity >= 0 { Side::Buy } else { Side::Sell }
    }

    /// Unsigned size of the order
    pub fn size(&self) -> Quantity {
        self.quantity.abs()
    }

    pub fn is_buy(&self) -> bool {
        self.quantity > 0
    }

    pub fn is_sell(&self) -> bool {
        self.quantity < 0
    }
}
