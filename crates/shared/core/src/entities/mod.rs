mod order;
mod position;
mod side;

pub use order::Order;
pub use position::Positions;
pub use side::Side;
