//! Static per-type vehicle parameters.
//!
//! A [`VehicleType`] is loaded once from configuration and shared read-only by
//! every courier of that type. Calculator-specific settings live in the open
//! [`VehicleParameters`] bag and are parsed when a cost model is bound.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading a named vehicle parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    /// The parameter is absent from the vehicle configuration.
    #[error("parameter `{name}` is missing")]
    Missing {
        /// Requested parameter name.
        name: String,
    },
    /// The parameter value is not a finite number.
    #[error("parameter `{name}` has unusable value `{raw}`")]
    Unparsable {
        /// Requested parameter name.
        name: String,
        /// Raw configured value.
        raw: String,
    },
}

/// A configured parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Numeric value.
    Number(f64),
    /// Free-form text, parsed on demand.
    Text(String),
}

impl ParameterValue {
    /// Interpret the value as a finite number.
    ///
    /// Text values accept either `.` or `,` as the decimal separator.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            Self::Number(number) => *number,
            Self::Text(text) => text.trim().replace(',', ".").parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    fn raw(&self) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Named parameters used by specific cost models.
///
/// Lookups ignore ASCII case.
///
/// # Examples
/// ```
/// use courier_core::VehicleParameters;
///
/// let params = VehicleParameters::new()
///     .with("first_fare", 150.0)
///     .with("km_fare", "12,5");
/// assert_eq!(params.number("FIRST_FARE"), Ok(150.0));
/// assert_eq!(params.number("km_fare"), Ok(12.5));
/// assert!(params.number("minute_fare").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleParameters(BTreeMap<String, ParameterValue>);

impl VehicleParameters {
    /// Construct an empty parameter bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<ParameterValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, name: &str, value: impl Into<ParameterValue>) {
        self.0.insert(name.to_owned(), value.into());
    }

    /// Look up a raw parameter value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.0.get(name).or_else(|| {
            self.0
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
    }

    /// Read a required numeric parameter.
    ///
    /// # Errors
    /// Returns [`ParameterError::Missing`] when absent and
    /// [`ParameterError::Unparsable`] when the value is not a finite number.
    pub fn number(&self, name: &str) -> Result<f64, ParameterError> {
        let value = self.get(name).ok_or_else(|| ParameterError::Missing {
            name: name.to_owned(),
        })?;
        value.as_number().ok_or_else(|| ParameterError::Unparsable {
            name: name.to_owned(),
            raw: value.raw(),
        })
    }

    /// Read an optional numeric parameter, falling back to `default` when
    /// absent.
    ///
    /// # Errors
    /// Returns [`ParameterError::Unparsable`] when present but unusable.
    pub fn number_or(&self, name: &str, default: f64) -> Result<f64, ParameterError> {
        match self.number(name) {
            Err(ParameterError::Missing { .. }) => Ok(default),
            other => other,
        }
    }

    /// Number of configured parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Report whether no parameters are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Capacity limits, fixed time costs and tariff for one vehicle type.
///
/// Times are minutes, weights kilograms and distances kilometres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleType {
    /// Vehicle type identifier.
    pub vehicle_id: u32,
    /// Taxis end their run at the last delivery; couriers return to the shop.
    #[serde(default)]
    pub is_taxi: bool,
    /// Heaviest single order the vehicle accepts.
    pub max_order_weight_kg: f64,
    /// Total payload limit.
    pub max_weight_kg: f64,
    /// Maximum number of orders in one run.
    pub max_orders: usize,
    /// Maximum route length.
    pub max_distance_km: f64,
    /// Delay before the vehicle is at the shop.
    #[serde(default)]
    pub start_delay_min: f64,
    /// Time to accept and load the orders at the shop.
    #[serde(default)]
    pub get_order_time_min: f64,
    /// Time to hand one order to the customer.
    #[serde(default)]
    pub hand_in_time_min: f64,
    /// Calculation-method identifier resolved by the calculator registry.
    pub calc_method: String,
    /// Parameters read by the bound cost model.
    #[serde(default)]
    pub parameters: VehicleParameters,
}

impl VehicleType {
    /// Minutes between the start of a run and departure from the shop.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "fixed time costs are fractional minutes"
    )]
    pub const fn pickup_minutes(&self) -> f64 {
        self.start_delay_min + self.get_order_time_min
    }
}
