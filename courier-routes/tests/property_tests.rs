//! Property-based tests for route enumeration.
//!
//! # Invariants tested
//!
//! - **Determinism:** two passes over the same input return identical routes.
//! - **Minimality:** each bundle carries the cheapest feasible permutation and
//!   no feasible bundle is missed.
//! - **Admissibility:** every returned route respects the vehicle limits,
//!   including a binding distance limit, and every checked delivery window.
//! - **Real tariffs:** minimality holds for every built-in cost model resolved
//!   through the calculator registry.
//! - **Canonical keys:** permuting indices never changes the key.


use std::collections::BTreeMap;

use courier_core::test_support::{bound_courier, noon, shop_at};
use courier_core::{BoundCourier, RouteDescriptor, Shop, minutes_delta};
use courier_routes::{CanonicalKey, FeasibilityChecker, enumerate_routes};
use geo::Coord;
use proptest::prelude::*;

use proptest_support::{
    Instance, brute_force_costs, instance_strategy, registry_courier, short_range_strategy,
    tariff_strategy,
};

fn summary(routes: &[RouteDescriptor<'_>]) -> Vec<(Vec<u64>, f64)> {
    routes
        .iter()
        .map(|route| (route.order_ids(), route.cost()))
        .collect()
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "weights and distances are compared as fractional values"
)]
fn admissible(instance: &Instance, route: &RouteDescriptor<'_>, max_len: usize) -> bool {
    let vehicle = &instance.vehicle;
    let total: f64 = route.orders().iter().map(|order| order.weight_kg).sum();
    let light = route
        .orders()
        .iter()
        .all(|order| order.weight_kg <= vehicle.max_order_weight_kg);
    let interval = route.interval();
    let windows_met = route
        .orders()
        .iter()
        .zip(route.order_delivery_time())
        .filter(|(order, _)| order.time_check_enabled())
        .all(|(order, minutes)| {
            minutes_delta(*minutes)
                .and_then(|delta| interval.earliest.checked_add_signed(delta))
                .is_some_and(|arrival| order.window.contains(arrival))
        });
    let within_range = route.total_distance_m() as f64 / 1_000.0 <= vehicle.max_distance_km;
    light
        && within_range
        && total <= vehicle.max_weight_kg + 1e-9
        && route.order_count() <= max_len
        && interval.earliest >= route.calc_time()
        && interval.earliest <= interval.latest
        && windows_met
}

/// Sorted distinct indices paired with a permutation of them.
fn shuffled_indices() -> impl Strategy<Value = (Vec<u16>, Vec<u16>)> {
    proptest::sample::subsequence((0_u16..64).collect::<Vec<_>>(), 1..=8)
        .prop_flat_map(|indices| (Just(indices.clone()), Just(indices).prop_shuffle()))
}

fn run<'a>(
    instance: &'a Instance,
    shop: &'a Shop,
    courier: &'a BoundCourier,
    max_len: usize,
) -> Vec<RouteDescriptor<'a>> {
    enumerate_routes(shop, &instance.orders, courier, max_len, noon(), &instance.matrix)
        .expect("generated requests are valid")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: enumeration is a pure function of its input.
    #[test]
    fn enumeration_is_deterministic(instance in instance_strategy(1, 6)) {
        let shop = shop_at(1, Coord { x: 0.0, y: 0.0 });
        let courier = bound_courier(instance.vehicle.clone());
        let first = run(&instance, &shop, &courier, 4);
        let second = run(&instance, &shop, &courier, 4);
        prop_assert_eq!(summary(&first), summary(&second));
    }

    /// Property: the depth-first walk agrees with checking every permutation.
    #[test]
    fn cheapest_permutation_matches_brute_force(instance in instance_strategy(1, 5)) {
        let shop = shop_at(1, Coord { x: 0.0, y: 0.0 });
        let courier = bound_courier(instance.vehicle.clone());
        let checker = FeasibilityChecker::new(&courier, &shop, &instance.matrix, noon());
        let expected = brute_force_costs(&checker, &instance.orders, 3);

        let routes = run(&instance, &shop, &courier, 3);
        let found: BTreeMap<Vec<u64>, f64> = routes
            .iter()
            .map(|route| {
                let mut ids = route.order_ids();
                ids.sort_unstable();
                (ids, route.cost())
            })
            .collect();
        prop_assert_eq!(routes.len(), found.len(), "bundles must be distinct");
        prop_assert_eq!(found, expected);
    }

    /// Property: returned routes respect weight, length and window limits.
    #[test]
    fn returned_routes_are_admissible(instance in instance_strategy(1, 6)) {
        let shop = shop_at(1, Coord { x: 0.0, y: 0.0 });
        let courier = bound_courier(instance.vehicle.clone());
        let routes = run(&instance, &shop, &courier, 3);
        for route in &routes {
            prop_assert!(
                admissible(&instance, route, 3),
                "route {:?} breaks a limit",
                route.order_ids()
            );
            prop_assert_eq!(route.is_loop(), !instance.vehicle.is_taxi);
        }
    }

    /// Property: routes stay within a distance limit short enough to bind.
    #[test]
    fn returned_routes_respect_a_binding_distance_limit(
        instance in short_range_strategy(1, 6),
    ) {
        let shop = shop_at(1, Coord { x: 0.0, y: 0.0 });
        let courier = bound_courier(instance.vehicle.clone());
        let routes = run(&instance, &shop, &courier, 3);
        for route in &routes {
            prop_assert!(
                admissible(&instance, route, 3),
                "route {:?} breaks a limit",
                route.order_ids()
            );
        }
    }

    /// Property: minimality holds with each built-in tariff, not just the
    /// minute-priced double.
    #[test]
    fn registry_tariffs_match_brute_force(
        instance in instance_strategy(1, 4),
        (method, parameters) in tariff_strategy(),
    ) {
        let shop = shop_at(1, Coord { x: 0.0, y: 0.0 });
        let courier = registry_courier(&instance.vehicle, method, parameters);
        prop_assert_eq!(courier.calculator().method(), method);
        let checker = FeasibilityChecker::new(&courier, &shop, &instance.matrix, noon());
        let expected = brute_force_costs(&checker, &instance.orders, 3);

        let routes = run(&instance, &shop, &courier, 3);
        let found: BTreeMap<Vec<u64>, f64> = routes
            .iter()
            .map(|route| {
                let mut ids = route.order_ids();
                ids.sort_unstable();
                (ids, route.cost())
            })
            .collect();
        prop_assert_eq!(found, expected);
        for route in &routes {
            prop_assert!(admissible(&instance, route, 3));
        }
    }

    /// Property: a key depends only on the set of indices.
    #[test]
    fn keys_ignore_visiting_order((indices, shuffled) in shuffled_indices()) {
        let sorted = CanonicalKey::from_indices(&indices).expect("at most eight indices");
        let permuted = CanonicalKey::from_indices(&shuffled).expect("at most eight indices");
        prop_assert_eq!(sorted, permuted);
        prop_assert_eq!(sorted.as_slice(), indices.as_slice());
    }
}
