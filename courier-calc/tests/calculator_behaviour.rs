//! Behavioural tests for resolving and applying cost models.

use std::cell::RefCell;
use std::sync::Arc;

use courier_calc::{CalculatorConfigError, CalculatorRegistry, CourierPool};
use courier_core::test_support::vehicle;
use courier_core::{Courier, GeoEdge, ShopBinding, VehicleParameters, VehicleType};
use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// Vehicle types staged by `given` steps.
#[fixture]
fn vehicles() -> RefCell<Vec<VehicleType>> {
    RefCell::new(Vec::new())
}

/// Outcome of building the pool.
#[fixture]
fn pool() -> RefCell<Option<Result<CourierPool, CalculatorConfigError>>> {
    RefCell::new(None)
}

/// Price of the last run.
#[fixture]
fn price() -> RefCell<Option<f64>> {
    RefCell::new(None)
}

fn build(
    vehicles: &RefCell<Vec<VehicleType>>,
    pool: &RefCell<Option<Result<CourierPool, CalculatorConfigError>>>,
) {
    let couriers: Vec<Courier> = vehicles
        .borrow()
        .iter()
        .zip(1_u64..)
        .map(|(vehicle_type, id)| {
            let binding = if vehicle_type.is_taxi {
                ShopBinding::TaxiPool
            } else {
                ShopBinding::Shop(1)
            };
            Courier::new(
                id,
                Arc::new(vehicle_type.clone()),
                binding,
                Coord { x: 0.0, y: 0.0 },
            )
        })
        .collect();
    let built = CourierPool::build(couriers, &CalculatorRegistry::with_defaults());
    *pool.borrow_mut() = Some(built);
}

#[given("a courier pool with an hourly vehicle at 600 per hour")]
fn hourly_pool(
    vehicles: &RefCell<Vec<VehicleType>>,
    pool: &RefCell<Option<Result<CourierPool, CalculatorConfigError>>>,
) {
    vehicles.borrow_mut().push(VehicleType {
        calc_method: "Hourly".into(),
        parameters: VehicleParameters::new().with("hourly_rate", 600.0),
        ..vehicle(false)
    });
    build(vehicles, pool);
}

#[given("a courier pool with a tariff A taxi")]
fn taxi_pool(
    vehicles: &RefCell<Vec<VehicleType>>,
    pool: &RefCell<Option<Result<CourierPool, CalculatorConfigError>>>,
) {
    vehicles.borrow_mut().push(VehicleType {
        calc_method: "CalcTaxiA".into(),
        parameters: VehicleParameters::new()
            .with("first_fare", 100.0)
            .with("minute_fare", 2.0)
            .with("free_pickup_minutes", 3.0)
            .with("km_fare", 10.0)
            .with("free_km", 2.0)
            .with("extra_order_fare", 25.0),
        ..vehicle(true)
    });
    build(vehicles, pool);
}

#[given("a vehicle using an unregistered calculation method")]
fn unknown_vehicle(vehicles: &RefCell<Vec<VehicleType>>) {
    vehicles.borrow_mut().push(VehicleType {
        vehicle_id: 9,
        calc_method: "Surge".into(),
        ..vehicle(false)
    });
}

#[when("I build the courier pool")]
fn build_pool(
    vehicles: &RefCell<Vec<VehicleType>>,
    pool: &RefCell<Option<Result<CourierPool, CalculatorConfigError>>>,
) {
    build(vehicles, pool);
}

fn price_run(
    pool: &RefCell<Option<Result<CourierPool, CalculatorConfigError>>>,
    price: &RefCell<Option<f64>>,
    edges: &[GeoEdge],
    is_loop: bool,
) {
    let borrow = pool.borrow();
    let Some(Ok(built)) = borrow.as_ref() else {
        panic!("pool must be built");
    };
    let Some(bound) = built.iter().next() else {
        panic!("pool must hold a courier");
    };
    let cost = bound
        .calculator()
        .calculate(bound.vehicle(), edges, 3.0, is_loop)
        .unwrap_or_else(|err| panic!("run should be feasible: {err}"));
    *price.borrow_mut() = Some(cost.total_cost);
}

#[when("I price a looped run with two 10 minute legs")]
fn looped_run(
    pool: &RefCell<Option<Result<CourierPool, CalculatorConfigError>>>,
    price: &RefCell<Option<f64>>,
) {
    price_run(pool, price, &[GeoEdge::new(2_000, 600); 2], true);
}

#[when("I price an open run with three 6 minute legs")]
fn open_run(
    pool: &RefCell<Option<Result<CourierPool, CalculatorConfigError>>>,
    price: &RefCell<Option<f64>>,
) {
    price_run(pool, price, &[GeoEdge::new(2_000, 360); 3], false);
}

#[then("the run costs {expected:f64}")]
#[expect(clippy::float_arithmetic, reason = "assertions compare prices")]
fn run_costs(expected: f64, price: &RefCell<Option<f64>>) {
    let Some(actual) = *price.borrow() else {
        panic!("run must be priced");
    };
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[then("pool construction fails naming the vehicle and its method")]
fn construction_fails(
    pool: &RefCell<Option<Result<CourierPool, CalculatorConfigError>>>,
) {
    let borrow = pool.borrow();
    match borrow.as_ref() {
        Some(Err(CalculatorConfigError::UnknownMethod {
            vehicle_id: found_id,
            calc_method,
        })) => {
            assert_eq!(*found_id, 9);
            assert_eq!(calc_method, "Surge");
        }
        Some(Err(other)) => panic!("unexpected error: {other}"),
        Some(Ok(_)) => panic!("pool construction should fail"),
        None => panic!("pool construction was not attempted"),
    }
}

#[scenario(path = "tests/features/calculator_registry.feature", index = 0)]
fn hourly_pricing(
    vehicles: RefCell<Vec<VehicleType>>,
    pool: RefCell<Option<Result<CourierPool, CalculatorConfigError>>>,
    price: RefCell<Option<f64>>,
) {
    let _ = (vehicles, pool, price);
}

#[scenario(path = "tests/features/calculator_registry.feature", index = 1)]
fn taxi_pricing(
    vehicles: RefCell<Vec<VehicleType>>,
    pool: RefCell<Option<Result<CourierPool, CalculatorConfigError>>>,
    price: RefCell<Option<f64>>,
) {
    let _ = (vehicles, pool, price);
}

#[scenario(path = "tests/features/calculator_registry.feature", index = 2)]
fn unknown_method(
    vehicles: RefCell<Vec<VehicleType>>,
    pool: RefCell<Option<Result<CourierPool, CalculatorConfigError>>>,
    price: RefCell<Option<f64>>,
) {
    let _ = (vehicles, pool, price);
}
