//! Test helpers for writing dispatch snapshots to disk.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use courier_core::test_support::{noon, order, shop_at, uniform_matrix, vehicle};
use courier_core::{ShopBinding, VehicleType};
use geo::Coord;
use tempfile::TempDir;

use crate::snapshot::{CourierRecord, ShopRecord, Snapshot};

pub(super) const ORIGIN: Coord<f64> = Coord { x: 0.0, y: 0.0 };

pub(super) fn write_utf8(path: &Utf8Path, bytes: &[u8]) {
    fs::write(path, bytes).expect("write fixture file");
}

/// Temporary directory exposed as a UTF-8 path.
pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn basic_vehicle(is_taxi: bool) -> VehicleType {
    VehicleType {
        calc_method: "basic".into(),
        ..vehicle(is_taxi)
    }
}

pub(super) fn courier_record(id: u64, vehicle_id: u32, binding: ShopBinding) -> CourierRecord {
    CourierRecord {
        id,
        vehicle_id,
        binding,
        location: ORIGIN,
        status: courier_core::CourierStatus::Ready,
        work_window: None,
        lunch_window: None,
    }
}

/// Two shops served by one shop courier and one taxi.
///
/// Shop 1 has orders 1 and 2, shop 2 has order 3. Courier 1 drives vehicle
/// type 1 for shop 1; courier 2 is a taxi on vehicle type 2.
pub(super) fn sample_snapshot() -> Snapshot {
    Snapshot {
        calc_time: noon(),
        vehicle_types: vec![basic_vehicle(false), basic_vehicle(true)],
        couriers: vec![
            courier_record(1, 1, ShopBinding::Shop(1)),
            courier_record(2, 2, ShopBinding::TaxiPool),
        ],
        shops: vec![
            ShopRecord {
                shop: shop_at(1, ORIGIN),
                orders: vec![order(1, 2.0, ORIGIN), order(2, 2.0, ORIGIN)],
                matrix: uniform_matrix(3, 1_000, 300),
            },
            ShopRecord {
                shop: shop_at(2, ORIGIN),
                orders: vec![order(3, 2.0, ORIGIN)],
                matrix: uniform_matrix(2, 1_000, 300),
            },
        ],
    }
}

pub(super) fn write_snapshot(path: &Utf8Path, snapshot: &Snapshot) {
    let payload = serde_json::to_string_pretty(snapshot).expect("serialize snapshot");
    write_utf8(path, payload.as_bytes());
}
