//! Exhaustive enumeration of order bundles for one shop and courier.
//!
//! The search is a depth-first walk over permutations. Depth one tries every
//! order on its own; each feasible sequence is extended by every unused order
//! until the length bound is reached. Infeasible prefixes are not extended.
//! Every feasible sequence is filed under its [`CanonicalKey`] and only the
//! strictly cheapest permutation per key is kept.

mod error;
mod parallel;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use courier_core::{BoundCourier, GeoMatrix, MAX_ROUTE_LEN, Order, RouteDescriptor, Shop};

pub use error::EnumerationError;
pub use parallel::{ShopRoutes, ShopTask};

use crate::capacity::estimated_capacity;
use crate::feasibility::FeasibilityChecker;
use crate::key::{CanonicalKey, PackedKeyState};

/// Largest order list a canonical key can index.
pub const MAX_ORDERS: usize = 1 << 16;

/// Configuration for [`RouteEnumerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumerationConfig {
    /// Longest bundle to build, between 1 and [`MAX_ROUTE_LEN`].
    pub max_route_len: usize,
    /// Wall-clock budget per courier; checked before each first order.
    pub deadline: Option<Duration>,
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self {
            max_route_len: MAX_ROUTE_LEN,
            deadline: None,
        }
    }
}

/// Counters describing one enumeration pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnumerationDiagnostics {
    /// Wall-clock time spent in the search.
    pub elapsed: Duration,
    /// Feasibility checks performed.
    pub checks: u64,
    /// Checks that produced a feasible route.
    pub feasible: u64,
    /// Distinct order bundles returned.
    pub distinct_sets: usize,
    /// The deadline stopped the search early.
    pub truncated: bool,
}

/// Cheapest feasible route per order bundle, sorted by bundle.
#[derive(Debug, Clone)]
pub struct RouteSet<'a> {
    /// One route per distinct bundle.
    pub routes: Vec<RouteDescriptor<'a>>,
    /// Search counters.
    pub diagnostics: EnumerationDiagnostics,
}

impl RouteSet<'_> {
    fn empty() -> Self {
        Self {
            routes: Vec::new(),
            diagnostics: EnumerationDiagnostics::default(),
        }
    }
}

/// Enumerates feasible bundles for one courier at a time.
///
/// # Examples
/// ```
/// use courier_core::test_support::{bound_courier, noon, order, shop_at, uniform_matrix, vehicle};
/// use courier_routes::{EnumerationConfig, RouteEnumerator};
/// use geo::Coord;
///
/// let here = Coord { x: 0.0, y: 0.0 };
/// let shop = shop_at(1, here);
/// let orders = vec![order(1, 1.0, here), order(2, 1.0, here), order(3, 1.0, here)];
/// let courier = bound_courier(vehicle(false));
/// let matrix = uniform_matrix(4, 500, 120);
///
/// let enumerator = RouteEnumerator::with_config(EnumerationConfig {
///     max_route_len: 2,
///     ..EnumerationConfig::default()
/// });
/// let found = enumerator.enumerate(&shop, &orders, &courier, noon(), &matrix)?;
/// // Three singles and three pairs.
/// assert_eq!(found.routes.len(), 6);
/// # Ok::<(), courier_routes::EnumerationError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteEnumerator {
    config: EnumerationConfig,
}

impl RouteEnumerator {
    /// Enumerator with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enumerator with explicit configuration.
    #[must_use]
    pub const fn with_config(config: EnumerationConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &EnumerationConfig {
        &self.config
    }

    /// Enumerate every feasible bundle of `orders` for `courier`.
    ///
    /// The matrix must index the orders first, in slice order, followed by
    /// the shop at index `orders.len()`.
    ///
    /// # Errors
    /// Returns [`EnumerationError`] when the length bound is out of range,
    /// there are too many orders, or the matrix is too small. An empty order
    /// list yields an empty set.
    pub fn enumerate<'a>(
        &self,
        shop: &'a Shop,
        orders: &'a [Order],
        courier: &'a BoundCourier,
        calc_time: DateTime<Utc>,
        matrix: &'a GeoMatrix,
    ) -> Result<RouteSet<'a>, EnumerationError> {
        let max_len = self.config.max_route_len;
        if max_len == 0 || max_len > MAX_ROUTE_LEN {
            return Err(EnumerationError::InvalidMaxLen {
                max_len,
                ceiling: MAX_ROUTE_LEN,
            });
        }
        if orders.is_empty() {
            return Ok(RouteSet::empty());
        }
        if orders.len() > MAX_ORDERS {
            return Err(EnumerationError::TooManyOrders {
                count: orders.len(),
                max: MAX_ORDERS,
            });
        }
        if !matrix.covers(orders.len() + 1) {
            return Err(EnumerationError::MatrixTooSmall {
                size: matrix.size(),
                required: orders.len() + 1,
            });
        }

        let started = Instant::now();
        let mut search = Search::new(
            FeasibilityChecker::new(courier, shop, matrix, calc_time),
            orders,
            max_len,
            self.config.deadline.and_then(|budget| started.checked_add(budget)),
        );
        search.run();
        let set = search.finish(started.elapsed());
        log::debug!(
            "shop {} courier {}: {} checks, {} feasible, {} bundles in {:?}",
            shop.id,
            courier.courier().id,
            set.diagnostics.checks,
            set.diagnostics.feasible,
            set.diagnostics.distinct_sets,
            set.diagnostics.elapsed
        );
        Ok(set)
    }
}

/// Enumerate with the default deadline-free configuration and a custom
/// length bound, returning only the routes.
///
/// # Errors
/// See [`RouteEnumerator::enumerate`].
pub fn enumerate_routes<'a>(
    shop: &'a Shop,
    orders: &'a [Order],
    courier: &'a BoundCourier,
    max_len: usize,
    calc_time: DateTime<Utc>,
    matrix: &'a GeoMatrix,
) -> Result<Vec<RouteDescriptor<'a>>, EnumerationError> {
    let enumerator = RouteEnumerator::with_config(EnumerationConfig {
        max_route_len: max_len,
        deadline: None,
    });
    enumerator
        .enumerate(shop, orders, courier, calc_time, matrix)
        .map(|set| set.routes)
}

/// Mutable state of one depth-first pass.
///
/// `path`, `visit` and `geo` are reused at every depth; their capacity is
/// fixed by the length bound.
struct Search<'a> {
    checker: FeasibilityChecker<'a>,
    orders: &'a [Order],
    shop_geo: usize,
    max_len: usize,
    deadline: Option<Instant>,
    used: Vec<bool>,
    path: Vec<u16>,
    visit: Vec<&'a Order>,
    geo: Vec<usize>,
    best: HashMap<CanonicalKey, usize, PackedKeyState>,
    routes: Vec<(CanonicalKey, RouteDescriptor<'a>)>,
    checks: u64,
    feasible: u64,
    truncated: bool,
}

impl<'a> Search<'a> {
    fn new(
        checker: FeasibilityChecker<'a>,
        orders: &'a [Order],
        max_len: usize,
        deadline: Option<Instant>,
    ) -> Self {
        let count = orders.len();
        Self {
            checker,
            orders,
            shop_geo: count,
            max_len,
            deadline,
            used: vec![false; count],
            path: Vec::with_capacity(max_len),
            visit: Vec::with_capacity(max_len),
            geo: Vec::with_capacity(max_len + 1),
            best: HashMap::with_capacity_and_hasher(
                estimated_capacity(count, max_len),
                PackedKeyState::for_universe(count),
            ),
            routes: Vec::new(),
            checks: 0,
            feasible: 0,
            truncated: false,
        }
    }

    fn run(&mut self) {
        for first in 0..self.orders.len() {
            if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                log::warn!(
                    "enumeration deadline reached after {first} of {} first orders",
                    self.orders.len()
                );
                self.truncated = true;
                break;
            }
            self.descend(first);
        }
    }

    fn descend(&mut self, index: usize) {
        let (Some(order), Ok(slot)) = (self.orders.get(index), u16::try_from(index)) else {
            return;
        };
        self.mark(index, true);
        self.path.push(slot);
        self.visit.push(order);
        self.geo.clear();
        self.geo.extend(self.path.iter().map(|slot| usize::from(*slot)));
        self.geo.push(self.shop_geo);

        self.checks += 1;
        match self.checker.check(&self.visit, &self.geo) {
            Ok(route) => {
                self.feasible += 1;
                self.keep(route);
                if self.path.len() < self.max_len {
                    for next in 0..self.orders.len() {
                        if self.used.get(next) == Some(&false) {
                            self.descend(next);
                        }
                    }
                }
            }
            Err(rejection) => log::trace!("sequence {:?} rejected: {rejection}", self.path),
        }

        self.visit.pop();
        self.path.pop();
        self.mark(index, false);
    }

    fn mark(&mut self, index: usize, used: bool) {
        if let Some(flag) = self.used.get_mut(index) {
            *flag = used;
        }
    }

    fn keep(&mut self, route: RouteDescriptor<'a>) {
        let Some(key) = CanonicalKey::from_indices(&self.path) else {
            return;
        };
        match self.best.entry(key) {
            Entry::Vacant(vacant) => {
                vacant.insert(self.routes.len());
                self.routes.push((key, route));
            }
            Entry::Occupied(occupied) => {
                if let Some((_, kept)) = self.routes.get_mut(*occupied.get()) {
                    if route.cost() < kept.cost() {
                        *kept = route;
                    }
                }
            }
        }
    }

    fn finish(self, elapsed: Duration) -> RouteSet<'a> {
        let mut routes = self.routes;
        routes.sort_unstable_by_key(|(key, _)| *key);
        let distinct_sets = routes.len();
        RouteSet {
            routes: routes.into_iter().map(|(_, route)| route).collect(),
            diagnostics: EnumerationDiagnostics {
                elapsed,
                checks: self.checks,
                feasible: self.feasible,
                distinct_sets,
                truncated: self.truncated,
            },
        }
    }
}
