//! Cost models and the calculator registry for the courier dispatch engine.
//!
//! Each vehicle type names a calculation method. The [`CalculatorRegistry`]
//! resolves that name once, at configuration time, into a shared
//! [`CostModel`](courier_core::CostModel) with its tariff parameters already
//! parsed. [`CourierPool::build`] applies the registry to every courier so an
//! enumeration pass never meets an unresolved or misconfigured calculator.

#![forbid(unsafe_code)]

mod error;
mod models;
mod pool;
mod registry;

pub use error::CalculatorConfigError;
pub use models::{BasicCostModel, HourlyCostModel, TaxiACostModel, TaxiBCostModel, TaxiTariff};
pub use pool::CourierPool;
pub use registry::{CalculatorRegistry, CostModelFactory, registry_key};
