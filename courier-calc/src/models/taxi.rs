//! Taxi tariffs.
//!
//! Both tariffs share a base fare with pickup and distance surcharges above
//! free allowances. Tariff A adds a fee per extra order; tariff B charges for
//! waiting on the first leg and for riding time after the first drop-off.

use courier_core::{
    CalcRejection, CostModel, GeoEdge, ParameterError, RouteCost, RouteTiming, VehicleParameters,
    VehicleType, route_timing,
};

/// Fare components common to both taxi tariffs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxiTariff {
    /// Flat fare charged for every run.
    pub first_fare: f64,
    /// Price per pickup minute above the free allowance.
    pub minute_fare: f64,
    /// Pickup minutes included in the first fare.
    pub free_pickup_minutes: f64,
    /// Price per kilometre above the free allowance.
    pub km_fare: f64,
    /// Kilometres included in the first fare.
    pub free_km: f64,
}

impl TaxiTariff {
    /// Read the shared fare components.
    ///
    /// `first_fare`, `minute_fare` and `km_fare` are required; the free
    /// allowances default to zero.
    ///
    /// # Errors
    /// Returns a [`ParameterError`] for missing required values or
    /// unparsable ones.
    pub fn from_parameters(parameters: &VehicleParameters) -> Result<Self, ParameterError> {
        Ok(Self {
            first_fare: parameters.number("first_fare")?,
            minute_fare: parameters.number("minute_fare")?,
            free_pickup_minutes: parameters.number_or("free_pickup_minutes", 0.0)?,
            km_fare: parameters.number("km_fare")?,
            free_km: parameters.number_or("free_km", 0.0)?,
        })
    }

    /// First fare plus the pickup and distance surcharges.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "fares are fractional amounts")]
    pub fn base_fare(&self, vehicle: &VehicleType, distance_km: f64) -> f64 {
        let pickup = (vehicle.pickup_minutes() - self.free_pickup_minutes).max(0.0);
        let distance = (distance_km - self.free_km).max(0.0);
        self.first_fare + self.minute_fare * pickup + self.km_fare * distance
    }
}

/// Taxi tariff A: base fare plus a fee for every order after the first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxiACostModel {
    /// Shared fare components.
    pub tariff: TaxiTariff,
    /// Fee per additional order in the run.
    pub extra_order_fare: f64,
}

impl TaxiACostModel {
    /// Read the tariff; `extra_order_fare` defaults to zero.
    ///
    /// # Errors
    /// Returns a [`ParameterError`] for missing or unparsable values.
    pub fn from_parameters(parameters: &VehicleParameters) -> Result<Self, ParameterError> {
        Ok(Self {
            tariff: TaxiTariff::from_parameters(parameters)?,
            extra_order_fare: parameters.number_or("extra_order_fare", 0.0)?,
        })
    }

    #[expect(clippy::float_arithmetic, reason = "fares are fractional amounts")]
    fn price(&self, vehicle: &VehicleType, timing: &RouteTiming) -> f64 {
        let extra_orders = u32::try_from(timing.order_count.saturating_sub(1)).unwrap_or(u32::MAX);
        self.tariff.base_fare(vehicle, timing.distance_km)
            + self.extra_order_fare * f64::from(extra_orders)
    }
}

impl CostModel for TaxiACostModel {
    fn method(&self) -> &str {
        "taxi_a"
    }

    fn calculate(
        &self,
        vehicle: &VehicleType,
        edges: &[GeoEdge],
        total_weight_kg: f64,
        is_loop: bool,
    ) -> Result<RouteCost, CalcRejection> {
        let timing = route_timing(vehicle, edges, total_weight_kg, is_loop)?;
        let total_cost = self.price(vehicle, &timing);
        Ok(into_route_cost(timing, total_cost))
    }
}

/// Taxi tariff B: base fare plus waiting and riding minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxiBCostModel {
    /// Shared fare components.
    pub tariff: TaxiTariff,
    /// Price per first-leg minute above the free allowance.
    pub wait_minute_fare: f64,
    /// First-leg minutes included in the first fare.
    pub free_first_leg_minutes: f64,
    /// Price per minute between the first drop-off and the end of the run.
    pub ride_minute_fare: f64,
}

impl TaxiBCostModel {
    /// Read the tariff; `free_first_leg_minutes` defaults to zero.
    ///
    /// # Errors
    /// Returns a [`ParameterError`] for missing or unparsable values.
    pub fn from_parameters(parameters: &VehicleParameters) -> Result<Self, ParameterError> {
        Ok(Self {
            tariff: TaxiTariff::from_parameters(parameters)?,
            wait_minute_fare: parameters.number("wait_minute_fare")?,
            free_first_leg_minutes: parameters.number_or("free_first_leg_minutes", 0.0)?,
            ride_minute_fare: parameters.number("ride_minute_fare")?,
        })
    }

    #[expect(clippy::float_arithmetic, reason = "fares are fractional amounts")]
    fn price(&self, vehicle: &VehicleType, timing: &RouteTiming) -> f64 {
        let waiting = (timing.first_leg_minutes - self.free_first_leg_minutes).max(0.0);
        let first_drop = timing.node_delivery_time.get(1).copied().unwrap_or(0.0);
        let riding = (timing.total_execution_time - first_drop).max(0.0);
        self.tariff.base_fare(vehicle, timing.distance_km)
            + self.wait_minute_fare * waiting
            + self.ride_minute_fare * riding
    }
}

impl CostModel for TaxiBCostModel {
    fn method(&self) -> &str {
        "taxi_b"
    }

    fn calculate(
        &self,
        vehicle: &VehicleType,
        edges: &[GeoEdge],
        total_weight_kg: f64,
        is_loop: bool,
    ) -> Result<RouteCost, CalcRejection> {
        let timing = route_timing(vehicle, edges, total_weight_kg, is_loop)?;
        let total_cost = self.price(vehicle, &timing);
        Ok(into_route_cost(timing, total_cost))
    }
}

fn into_route_cost(timing: RouteTiming, total_cost: f64) -> RouteCost {
    RouteCost {
        node_delivery_time: timing.node_delivery_time,
        total_delivery_time: timing.total_delivery_time,
        total_execution_time: timing.total_execution_time,
        total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::test_support::vehicle;
    use rstest::{fixture, rstest};

    #[fixture]
    fn tariff() -> TaxiTariff {
        TaxiTariff {
            first_fare: 100.0,
            minute_fare: 2.0,
            free_pickup_minutes: 3.0,
            km_fare: 10.0,
            free_km: 2.0,
        }
    }

    /// Three 2 km legs of 6 minutes each, no return.
    fn edges() -> Vec<GeoEdge> {
        vec![GeoEdge::new(2_000, 360); 3]
    }

    #[rstest]
    fn tariff_a_charges_extra_orders(tariff: TaxiTariff) {
        let model = TaxiACostModel {
            tariff,
            extra_order_fare: 25.0,
        };
        let cost = model
            .calculate(&vehicle(true), &edges(), 3.0, false)
            .expect("feasible");
        // 100 + 2 * (5 - 3) + 10 * (6 - 2) + 25 * 2
        assert!((cost.total_cost - 194.0).abs() < 1e-9);
    }

    #[rstest]
    fn tariff_b_charges_waiting_and_riding(tariff: TaxiTariff) {
        let model = TaxiBCostModel {
            tariff,
            wait_minute_fare: 1.0,
            free_first_leg_minutes: 4.0,
            ride_minute_fare: 0.5,
        };
        let cost = model
            .calculate(&vehicle(true), &edges(), 3.0, false)
            .expect("feasible");
        // Shop at 5, drops at 14, 23, 32; waiting 6 - 4 = 2; riding 32 - 14 = 18.
        // 100 + 4 + 40 + 1 * 2 + 0.5 * 18
        assert_eq!(cost.node_delivery_time, vec![5.0, 14.0, 23.0, 32.0]);
        assert!((cost.total_cost - 155.0).abs() < 1e-9);
    }

    #[rstest]
    fn allowances_never_produce_discounts() {
        let generous = TaxiTariff {
            first_fare: 80.0,
            minute_fare: 5.0,
            free_pickup_minutes: 60.0,
            km_fare: 5.0,
            free_km: 50.0,
        };
        assert!((generous.base_fare(&vehicle(true), 3.0) - 80.0).abs() < 1e-9);
    }

    #[rstest]
    fn optional_allowances_default_to_zero() {
        let params = VehicleParameters::new()
            .with("first_fare", 100.0)
            .with("minute_fare", 2.0)
            .with("km_fare", "10");
        let parsed = TaxiTariff::from_parameters(&params).expect("valid tariff");
        assert_eq!(parsed.free_km, 0.0);
        assert_eq!(parsed.free_pickup_minutes, 0.0);
    }

    #[rstest]
    fn tariff_b_requires_ride_fare() {
        let params = VehicleParameters::new()
            .with("first_fare", 100.0)
            .with("minute_fare", 2.0)
            .with("km_fare", 10.0)
            .with("wait_minute_fare", 1.0);
        assert_eq!(
            TaxiBCostModel::from_parameters(&params),
            Err(ParameterError::Missing {
                name: "ride_minute_fare".into()
            })
        );
    }
}
