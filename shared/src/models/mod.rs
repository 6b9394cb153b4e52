//! Domain entities shared between the engine and its HTTP boundary.

pub mod antenna;
pub mod audit;
pub mod basket;
pub mod catalog;
pub mod epc;
pub mod location;
pub mod receiving_order;
pub mod rule;
pub mod rule_template;
pub mod sku;
pub mod staff;
pub mod task;

pub use antenna::*;
pub use audit::*;
pub use basket::*;
pub use catalog::*;
pub use epc::*;
pub use location::*;
pub use receiving_order::*;
pub use rule::*;
pub use rule_template::*;
pub use sku::*;
pub use staff::*;
pub use task::*;
