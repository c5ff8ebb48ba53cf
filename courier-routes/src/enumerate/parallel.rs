//! Fan-out of independent shops across the rayon pool.

use chrono::{DateTime, Utc};
use courier_core::{BoundCourier, GeoMatrix, Order, Shop};
use rayon::prelude::*;

use super::{EnumerationError, RouteEnumerator, RouteSet};

/// One shop's orders, matrix and eligible couriers.
#[derive(Debug, Clone)]
pub struct ShopTask<'a> {
    /// Shop the orders leave from.
    pub shop: &'a Shop,
    /// Pending orders in matrix order.
    pub orders: &'a [Order],
    /// Couriers allowed to serve the shop.
    pub couriers: Vec<&'a BoundCourier>,
    /// Matrix over the orders followed by the shop.
    pub matrix: &'a GeoMatrix,
}

/// Enumeration outcome for one shop and courier.
#[derive(Debug)]
pub struct ShopRoutes<'a> {
    /// Shop identifier.
    pub shop_id: u64,
    /// Courier identifier.
    pub courier_id: u64,
    /// Routes or the reason the pass could not run.
    pub outcome: Result<RouteSet<'a>, EnumerationError>,
}

impl RouteEnumerator {
    /// Enumerate every shop task in parallel.
    ///
    /// Shops share nothing mutable, so each runs on its own worker; couriers
    /// within a shop run in turn. Results keep task order, then courier
    /// order.
    #[must_use]
    pub fn enumerate_shops<'a>(
        &self,
        tasks: &[ShopTask<'a>],
        calc_time: DateTime<Utc>,
    ) -> Vec<ShopRoutes<'a>> {
        tasks
            .par_iter()
            .flat_map_iter(|task| {
                task.couriers.iter().copied().map(move |courier| ShopRoutes {
                    shop_id: task.shop.id,
                    courier_id: courier.courier().id,
                    outcome: self.enumerate(
                        task.shop,
                        task.orders,
                        courier,
                        calc_time,
                        task.matrix,
                    ),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::EnumerationConfig;
    use courier_core::test_support::{
        bound_courier, noon, order, shop_at, uniform_matrix, vehicle,
    };
    use geo::Coord;
    use rstest::rstest;

    const HERE: Coord<f64> = Coord { x: 0.0, y: 0.0 };

    #[rstest]
    fn results_follow_task_order() {
        let shops = [shop_at(1, HERE), shop_at(2, HERE)];
        let orders = [
            vec![order(1, 1.0, HERE), order(2, 1.0, HERE)],
            vec![order(3, 1.0, HERE)],
        ];
        let matrices = [uniform_matrix(3, 100, 60), uniform_matrix(2, 100, 60)];
        let foot = bound_courier(vehicle(false));
        let taxi = bound_courier(vehicle(true));
        let tasks: Vec<ShopTask<'_>> = shops
            .iter()
            .zip(&orders)
            .zip(&matrices)
            .map(|((shop, orders), matrix)| ShopTask {
                shop,
                orders,
                couriers: vec![&foot, &taxi],
                matrix,
            })
            .collect();

        let enumerator = RouteEnumerator::with_config(EnumerationConfig {
            max_route_len: 2,
            deadline: None,
        });
        let results = enumerator.enumerate_shops(&tasks, noon());

        let shops_seen: Vec<u64> = results.iter().map(|r| r.shop_id).collect();
        assert_eq!(shops_seen, vec![1, 1, 2, 2]);
        let counts: Vec<usize> = results
            .iter()
            .map(|r| r.outcome.as_ref().map_or(0, |set| set.routes.len()))
            .collect();
        assert_eq!(counts, vec![3, 3, 1, 1]);
    }

    #[rstest]
    fn failures_stay_with_their_shop() {
        let shop = shop_at(1, HERE);
        let orders = vec![order(1, 1.0, HERE), order(2, 1.0, HERE)];
        let short = uniform_matrix(2, 100, 60);
        let courier = bound_courier(vehicle(false));
        let tasks = [ShopTask {
            shop: &shop,
            orders: &orders,
            couriers: vec![&courier],
            matrix: &short,
        }];
        let results = RouteEnumerator::new().enumerate_shops(&tasks, noon());
        assert!(matches!(
            results.first().map(|r| &r.outcome),
            Some(Err(EnumerationError::MatrixTooSmall { size: 2, required: 3 }))
        ));
    }
}
