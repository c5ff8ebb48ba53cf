//! Configuration errors raised while binding cost models.

use courier_core::ParameterError;
use thiserror::Error;

/// Errors raised when a vehicle type's calculator cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculatorConfigError {
    /// No cost model is registered under the vehicle's calculation method.
    #[error("vehicle type {vehicle_id}: unknown calculation method `{calc_method}`")]
    UnknownMethod {
        /// Offending vehicle type.
        vehicle_id: u32,
        /// Configured method name.
        calc_method: String,
    },
    /// The cost model exists but a tariff parameter is missing or unusable.
    #[error("vehicle type {vehicle_id}: calculation method `{calc_method}`: {source}")]
    Parameter {
        /// Offending vehicle type.
        vehicle_id: u32,
        /// Configured method name.
        calc_method: String,
        /// Parameter lookup failure.
        #[source]
        source: ParameterError,
    },
    /// Two couriers carry different vehicle types under the same id.
    #[error("vehicle type {vehicle_id} is defined more than once with different settings")]
    ConflictingVehicle {
        /// Id shared by the conflicting definitions.
        vehicle_id: u32,
    },
}
