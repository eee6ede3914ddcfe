use rust_decimal::Decimal;

/// Price value - uses Decimal for precision
/// Exchange prices are whole ticks; fair values and mids may be fractional
pub type Price = Decimal;

/// Quantity value - whole units, signed where direction matters
pub type Quantity = i64;

/// Identifier of a tradeable product
pub type ProductId = String;
