//! Reference cost models shipped with the default registry.

mod basic;
mod hourly;
mod taxi;

pub use basic::BasicCostModel;
pub use hourly::HourlyCostModel;
pub use taxi::{TaxiACostModel, TaxiBCostModel, TaxiTariff};
