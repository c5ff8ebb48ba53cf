//! Startup registry mapping calculation-method names to cost models.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use courier_core::{BoundCourier, CostModel, Courier, ParameterError, VehicleType};

use crate::error::CalculatorConfigError;
use crate::models::{BasicCostModel, HourlyCostModel, TaxiACostModel, TaxiBCostModel};

/// Builds a cost model for one vehicle type, parsing its tariff parameters.
pub type CostModelFactory =
    Arc<dyn Fn(&VehicleType) -> Result<Arc<dyn CostModel>, ParameterError> + Send + Sync>;

/// Normalise a calculation-method name into its registry key.
///
/// Keys are lower-cased, ignore `_` and `-`, and always carry the `calc`
/// prefix, so `TaxiA`, `taxi_a` and `CalcTaxiA` resolve to the same model.
///
/// # Examples
/// ```
/// use courier_calc::registry_key;
///
/// assert_eq!(registry_key("TaxiA"), "calctaxia");
/// assert_eq!(registry_key("CalcTaxiA"), "calctaxia");
/// assert_eq!(registry_key(" hourly "), "calchourly");
/// ```
#[must_use]
pub fn registry_key(method: &str) -> String {
    let name: String = method
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, '_' | '-'))
        .map(|ch| ch.to_ascii_lowercase())
        .collect();
    if name.starts_with("calc") {
        name
    } else {
        format!("calc{name}")
    }
}

/// Explicit table of cost-model factories, populated once at startup.
///
/// # Examples
/// ```
/// use courier_calc::CalculatorRegistry;
/// use courier_core::{VehicleParameters, VehicleType};
///
/// let registry = CalculatorRegistry::with_defaults();
/// let vehicle = VehicleType {
///     vehicle_id: 7,
///     is_taxi: true,
///     max_order_weight_kg: 10.0,
///     max_weight_kg: 30.0,
///     max_orders: 4,
///     max_distance_km: 25.0,
///     start_delay_min: 5.0,
///     get_order_time_min: 2.0,
///     hand_in_time_min: 3.0,
///     calc_method: "Hourly".into(),
///     parameters: VehicleParameters::new().with("hourly_rate", 420.0),
/// };
/// let model = registry.resolve(&vehicle)?;
/// assert_eq!(model.method(), "hourly");
/// # Ok::<(), courier_calc::CalculatorConfigError>(())
/// ```
#[derive(Clone, Default)]
pub struct CalculatorRegistry {
    factories: HashMap<String, CostModelFactory>,
}

impl CalculatorRegistry {
    /// Construct an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a registry holding the reference models: `basic` (also
    /// registered as `default`), `taxi_a`, `taxi_b` and `hourly`.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("basic", |_| Ok(Arc::new(BasicCostModel)));
        registry.register("default", |_| Ok(Arc::new(BasicCostModel)));
        registry.register("taxi_a", |vehicle| {
            Ok(Arc::new(TaxiACostModel::from_parameters(&vehicle.parameters)?))
        });
        registry.register("taxi_b", |vehicle| {
            Ok(Arc::new(TaxiBCostModel::from_parameters(&vehicle.parameters)?))
        });
        registry.register("hourly", |vehicle| {
            Ok(Arc::new(HourlyCostModel::from_parameters(&vehicle.parameters)?))
        });
        registry
    }

    /// Register `factory` under `method`, replacing any previous entry.
    pub fn register<F>(&mut self, method: &str, factory: F)
    where
        F: Fn(&VehicleType) -> Result<Arc<dyn CostModel>, ParameterError> + Send + Sync + 'static,
    {
        self.factories.insert(registry_key(method), Arc::new(factory));
    }

    /// Report whether a model is registered for `method`.
    #[must_use]
    pub fn contains(&self, method: &str) -> bool {
        self.factories.contains_key(&registry_key(method))
    }

    /// Number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Report whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Resolve and configure the cost model for `vehicle`.
    ///
    /// # Errors
    /// Returns [`CalculatorConfigError::UnknownMethod`] when the method is not
    /// registered and [`CalculatorConfigError::Parameter`] when the model
    /// cannot read its tariff parameters.
    pub fn resolve(
        &self,
        vehicle: &VehicleType,
    ) -> Result<Arc<dyn CostModel>, CalculatorConfigError> {
        let factory = self
            .factories
            .get(&registry_key(&vehicle.calc_method))
            .ok_or_else(|| CalculatorConfigError::UnknownMethod {
                vehicle_id: vehicle.vehicle_id,
                calc_method: vehicle.calc_method.clone(),
            })?;
        factory(vehicle).map_err(|source| CalculatorConfigError::Parameter {
            vehicle_id: vehicle.vehicle_id,
            calc_method: vehicle.calc_method.clone(),
            source,
        })
    }

    /// Pair `courier` with the model resolved for its vehicle type.
    ///
    /// # Errors
    /// Propagates [`CalculatorRegistry::resolve`] failures.
    pub fn bind(&self, courier: Courier) -> Result<BoundCourier, CalculatorConfigError> {
        let calculator = self.resolve(&courier.vehicle)?;
        Ok(BoundCourier::new(courier, calculator))
    }
}

impl fmt::Debug for CalculatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("CalculatorRegistry")
            .field("methods", &keys)
            .finish()
    }
}
