//! JSON dispatch snapshot read by the `enumerate` command.
//!
//! A snapshot freezes everything one dispatch pass needs: the calculation
//! time, vehicle types, couriers and, per shop, its pending orders with a
//! distance matrix over those orders followed by the shop.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::BufReader;
use std::sync::Arc;

use camino::Utf8Path;
use chrono::{DateTime, Utc};
use courier_core::{
    Courier, CourierStatus, GeoMatrix, Order, Shop, ShopBinding, TimeWindow, VehicleType,
};
use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::CliError;
use crate::fs::open_utf8_file;

/// Frozen dispatch state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Snapshot {
    /// Clock time routes are evaluated at.
    pub(crate) calc_time: DateTime<Utc>,
    /// Vehicle types referenced by couriers.
    #[serde(default)]
    pub(crate) vehicle_types: Vec<VehicleType>,
    /// Couriers on shift.
    #[serde(default)]
    pub(crate) couriers: Vec<CourierRecord>,
    /// Shops with pending orders.
    #[serde(default)]
    pub(crate) shops: Vec<ShopRecord>,
}

/// Courier state with its vehicle type given by identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CourierRecord {
    pub(crate) id: u64,
    pub(crate) vehicle_id: u32,
    pub(crate) binding: ShopBinding,
    pub(crate) location: Coord<f64>,
    #[serde(default)]
    pub(crate) status: CourierStatus,
    #[serde(default)]
    pub(crate) work_window: Option<TimeWindow>,
    #[serde(default)]
    pub(crate) lunch_window: Option<TimeWindow>,
}

/// One shop, its pending orders and their distance matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ShopRecord {
    pub(crate) shop: Shop,
    #[serde(default)]
    pub(crate) orders: Vec<Order>,
    pub(crate) matrix: GeoMatrix,
}

impl Snapshot {
    /// Check that every shop matrix covers exactly its orders plus the shop.
    pub(crate) fn validate(&self) -> Result<(), CliError> {
        for record in &self.shops {
            let expected = record.orders.len() + 1;
            if record.matrix.size() != expected {
                return Err(CliError::MatrixSize {
                    shop_id: record.shop.id,
                    expected,
                    found: record.matrix.size(),
                });
            }
        }
        Ok(())
    }

    /// Resolve courier records against the vehicle types.
    pub(crate) fn couriers(&self) -> Result<Vec<Courier>, CliError> {
        let mut vehicles: HashMap<u32, Arc<VehicleType>> =
            HashMap::with_capacity(self.vehicle_types.len());
        for vehicle in &self.vehicle_types {
            match vehicles.entry(vehicle.vehicle_id) {
                Entry::Occupied(_) => {
                    return Err(CliError::DuplicateVehicle {
                        vehicle_id: vehicle.vehicle_id,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(Arc::new(vehicle.clone()));
                }
            }
        }

        self.couriers
            .iter()
            .map(|record| {
                let vehicle = vehicles.get(&record.vehicle_id).cloned().ok_or(
                    CliError::UnknownVehicle {
                        courier_id: record.id,
                        vehicle_id: record.vehicle_id,
                    },
                )?;
                let mut courier =
                    Courier::new(record.id, vehicle, record.binding, record.location);
                courier.status = record.status;
                courier.work_window = record.work_window;
                courier.lunch_window = record.lunch_window;
                Ok(courier)
            })
            .collect()
    }
}

/// Loads a JSON-encoded [`Snapshot`] from disk.
pub(crate) fn load_snapshot(path: &Utf8Path) -> Result<Snapshot, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenSnapshot {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseSnapshot {
        path: path.to_path_buf(),
        source,
    })
}
