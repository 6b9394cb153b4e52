//! Min/max evaluation: sales locations work through replenishment tasks,
//! non-sales locations work through receiving orders.

mod receiving;
mod replenishment;

pub use receiving::evaluate_non_sales_rule;
pub use replenishment::{evaluate_sales_rule, reserved_from_source};
