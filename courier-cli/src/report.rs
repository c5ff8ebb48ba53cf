//! Owned JSON report of one enumeration run.

use chrono::{DateTime, Utc};
use courier_core::RouteDescriptor;
use courier_routes::{EnumerationDiagnostics, ShopRoutes};
use serde::{Deserialize, Serialize};

/// Everything the `enumerate` command prints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RouteReport {
    pub(crate) calc_time: DateTime<Utc>,
    /// Shops skipped because they were closed at `calc_time`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) closed_shops: Vec<u64>,
    pub(crate) results: Vec<CourierRoutes>,
}

/// Routes found for one shop and courier, or why none could be searched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CourierRoutes {
    pub(crate) shop_id: u64,
    pub(crate) courier_id: u64,
    #[serde(default)]
    pub(crate) routes: Vec<RouteRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) diagnostics: Option<DiagnosticsRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
}

/// A feasible route, flattened to identifiers and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RouteRecord {
    pub(crate) order_ids: Vec<u64>,
    pub(crate) is_loop: bool,
    pub(crate) cost: f64,
    pub(crate) weight_kg: f64,
    pub(crate) distance_m: i64,
    pub(crate) node_delivery_time: Vec<f64>,
    pub(crate) total_delivery_time: f64,
    pub(crate) total_execution_time: f64,
    pub(crate) start_earliest: DateTime<Utc>,
    pub(crate) start_latest: DateTime<Utc>,
}

/// Search counters with the elapsed time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct DiagnosticsRecord {
    pub(crate) checks: u64,
    pub(crate) feasible: u64,
    pub(crate) distinct_sets: usize,
    pub(crate) elapsed_ms: u64,
    pub(crate) truncated: bool,
}

impl From<&RouteDescriptor<'_>> for RouteRecord {
    fn from(route: &RouteDescriptor<'_>) -> Self {
        let interval = route.interval();
        Self {
            order_ids: route.order_ids(),
            is_loop: route.is_loop(),
            cost: route.cost(),
            weight_kg: route.weight_kg(),
            distance_m: route.total_distance_m(),
            node_delivery_time: route.node_delivery_time().to_vec(),
            total_delivery_time: route.total_delivery_time(),
            total_execution_time: route.total_execution_time(),
            start_earliest: interval.earliest,
            start_latest: interval.latest,
        }
    }
}

impl From<EnumerationDiagnostics> for DiagnosticsRecord {
    fn from(diagnostics: EnumerationDiagnostics) -> Self {
        Self {
            checks: diagnostics.checks,
            feasible: diagnostics.feasible,
            distinct_sets: diagnostics.distinct_sets,
            elapsed_ms: u64::try_from(diagnostics.elapsed.as_millis()).unwrap_or(u64::MAX),
            truncated: diagnostics.truncated,
        }
    }
}

impl From<&ShopRoutes<'_>> for CourierRoutes {
    fn from(found: &ShopRoutes<'_>) -> Self {
        match &found.outcome {
            Ok(set) => Self {
                shop_id: found.shop_id,
                courier_id: found.courier_id,
                routes: set.routes.iter().map(RouteRecord::from).collect(),
                diagnostics: Some(set.diagnostics.into()),
                error: None,
            },
            Err(err) => Self {
                shop_id: found.shop_id,
                courier_id: found.courier_id,
                routes: Vec::new(),
                diagnostics: None,
                error: Some(err.to_string()),
            },
        }
    }
}
