//! Courier pool with every cost model resolved up front.

use std::collections::HashMap;
use std::sync::Arc;

use courier_core::{BoundCourier, CostModel, Courier, ShopBinding, VehicleType};

use crate::error::CalculatorConfigError;
use crate::registry::CalculatorRegistry;

/// Couriers paired with their validated cost models.
///
/// Couriers sharing a vehicle type share one cost-model instance. Vehicle
/// types are matched by id, so every courier naming an id must carry the
/// same definition.
#[derive(Debug, Clone, Default)]
pub struct CourierPool {
    couriers: Vec<BoundCourier>,
}

impl CourierPool {
    /// Bind every courier through `registry`.
    ///
    /// Construction is all-or-nothing: the first vehicle type whose
    /// calculator cannot be resolved aborts the build, as does an id reused
    /// for a vehicle type with different settings.
    ///
    /// # Errors
    /// Returns the [`CalculatorConfigError`] naming the offending vehicle
    /// type, calculation method and parameter, or
    /// [`CalculatorConfigError::ConflictingVehicle`] for a reused id.
    pub fn build<I>(
        couriers: I,
        registry: &CalculatorRegistry,
    ) -> Result<Self, CalculatorConfigError>
    where
        I: IntoIterator<Item = Courier>,
    {
        let mut models: HashMap<u32, (Arc<VehicleType>, Arc<dyn CostModel>)> = HashMap::new();
        let mut bound = Vec::new();
        for courier in couriers {
            let vehicle_id = courier.vehicle.vehicle_id;
            let model = match models.get(&vehicle_id) {
                Some((known, shared)) => {
                    if !Arc::ptr_eq(known, &courier.vehicle) && **known != *courier.vehicle {
                        return Err(CalculatorConfigError::ConflictingVehicle { vehicle_id });
                    }
                    Arc::clone(shared)
                }
                None => {
                    let resolved = registry.resolve(&courier.vehicle)?;
                    models.insert(
                        vehicle_id,
                        (Arc::clone(&courier.vehicle), Arc::clone(&resolved)),
                    );
                    resolved
                }
            };
            bound.push(BoundCourier::new(courier, model));
        }
        log::info!(
            "bound {} couriers across {} vehicle types",
            bound.len(),
            models.len()
        );
        Ok(Self { couriers: bound })
    }

    /// Number of couriers in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.couriers.len()
    }

    /// Report whether the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.couriers.is_empty()
    }

    /// Iterate over every bound courier.
    pub fn iter(&self) -> impl Iterator<Item = &BoundCourier> {
        self.couriers.iter()
    }

    /// Look up a courier by id.
    #[must_use]
    pub fn get(&self, courier_id: u64) -> Option<&BoundCourier> {
        self.couriers
            .iter()
            .find(|bound| bound.courier().id == courier_id)
    }

    /// Couriers that may take orders from `shop_id`: shop-bound couriers
    /// first, then the shared taxi pool.
    pub fn couriers_for(&self, shop_id: u64) -> impl Iterator<Item = &BoundCourier> {
        let own = self
            .couriers
            .iter()
            .filter(move |bound| bound.courier().binding == ShopBinding::Shop(shop_id));
        let taxis = self
            .couriers
            .iter()
            .filter(|bound| bound.courier().binding == ShopBinding::TaxiPool);
        own.chain(taxis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::test_support::vehicle;
    use courier_core::{VehicleParameters, VehicleType};
    use geo::Coord;
    use rstest::rstest;

    fn courier(id: u64, vehicle: &Arc<VehicleType>, binding: ShopBinding) -> Courier {
        Courier::new(id, Arc::clone(vehicle), binding, Coord { x: 0.0, y: 0.0 })
    }

    fn basic(is_taxi: bool) -> Arc<VehicleType> {
        Arc::new(VehicleType {
            calc_method: "Basic".into(),
            ..vehicle(is_taxi)
        })
    }

    #[rstest]
    fn shop_couriers_come_before_taxis() {
        let walker = basic(false);
        let taxi = basic(true);
        let pool = CourierPool::build(
            [
                courier(1, &taxi, ShopBinding::TaxiPool),
                courier(2, &walker, ShopBinding::Shop(10)),
                courier(3, &walker, ShopBinding::Shop(20)),
                courier(4, &walker, ShopBinding::Shop(10)),
            ],
            &CalculatorRegistry::with_defaults(),
        )
        .expect("valid pool");
        let ids: Vec<u64> = pool.couriers_for(10).map(|b| b.courier().id).collect();
        assert_eq!(ids, vec![2, 4, 1]);
        assert_eq!(pool.len(), 4);
        assert!(pool.get(3).is_some());
    }

    #[rstest]
    fn one_bad_vehicle_type_aborts_the_build() {
        let broken = Arc::new(VehicleType {
            vehicle_id: 42,
            calc_method: "TaxiA".into(),
            parameters: VehicleParameters::new().with("first_fare", 100.0),
            ..vehicle(true)
        });
        let result = CourierPool::build(
            [
                courier(1, &basic(false), ShopBinding::Shop(1)),
                courier(2, &broken, ShopBinding::TaxiPool),
            ],
            &CalculatorRegistry::with_defaults(),
        );
        assert!(matches!(
            result,
            Err(CalculatorConfigError::Parameter { vehicle_id: 42, .. })
        ));
    }

    #[rstest]
    fn reused_vehicle_id_with_another_tariff_is_rejected() {
        let cheap = Arc::new(VehicleType {
            calc_method: "Hourly".into(),
            parameters: VehicleParameters::new().with("hourly_rate", 100.0),
            ..vehicle(false)
        });
        let dear = Arc::new(VehicleType {
            parameters: VehicleParameters::new().with("hourly_rate", 900.0),
            ..(*cheap).clone()
        });
        let result = CourierPool::build(
            [
                courier(1, &cheap, ShopBinding::Shop(1)),
                courier(2, &dear, ShopBinding::Shop(1)),
            ],
            &CalculatorRegistry::with_defaults(),
        );
        assert!(matches!(
            result,
            Err(CalculatorConfigError::ConflictingVehicle { vehicle_id: 1 })
        ));
    }

    #[rstest]
    fn equal_definitions_share_one_model() {
        let first = basic(false);
        let copy = Arc::new((*first).clone());
        let pool = CourierPool::build(
            [
                courier(1, &first, ShopBinding::Shop(1)),
                courier(2, &copy, ShopBinding::Shop(1)),
            ],
            &CalculatorRegistry::with_defaults(),
        )
        .expect("identical vehicle types are not a conflict");
        let models: Vec<&dyn CostModel> = pool.iter().map(BoundCourier::calculator).collect();
        let [a, b] = models.as_slice() else {
            panic!("expected two couriers");
        };
        assert!(std::ptr::addr_eq(*a, *b));
    }
}
