//! Shared fixtures for in-memory integration tests.

use mockable::DefaultClock;
use rstest::fixture;
use serde_json::json;
use std::sync::Arc;
use table_dispatch::api::{DispatchApi, OrderCreateBulk, StatusUpdate, TableCoordinateCreate};
use table_dispatch::coordinate::adapters::memory::InMemoryCoordinateRepository;
use table_dispatch::delivery::adapters::memory::InMemoryDeliveryRepository;
use table_dispatch::delivery::domain::TransitionPolicy;

/// Dispatch boundary over in-memory storage.
pub type MemoryApi =
    DispatchApi<InMemoryCoordinateRepository, InMemoryDeliveryRepository, DefaultClock>;

/// Tables registered by the [`restaurant`] fixture with their x coordinate.
pub const TABLES: [(&str, f64); 3] = [("T1", 1.0), ("T2", 3.0), ("T3", 5.0)];

/// Builds a boundary with empty storage.
#[must_use]
pub fn empty_api(policy: TransitionPolicy) -> MemoryApi {
    DispatchApi::new(
        Arc::new(InMemoryCoordinateRepository::new()),
        Arc::new(InMemoryDeliveryRepository::new()),
        Arc::new(DefaultClock),
        policy,
    )
}

/// Provides a permissive boundary with [`TABLES`] registered.
#[fixture]
pub async fn restaurant() -> MemoryApi {
    let api = empty_api(TransitionPolicy::Permissive);
    for (table, x) in TABLES {
        api.register_coordinate(TableCoordinateCreate {
            table_number: table.to_owned(),
            goal_x: x,
            goal_y: 2.0,
            goal_yaw: 0.0,
        })
        .await
        .expect("registration should succeed");
    }
    api
}

/// Builds a bulk order body from table numbers.
#[must_use]
pub fn bulk(tables: &[&str]) -> OrderCreateBulk {
    let orders: Vec<_> = tables
        .iter()
        .map(|table| json!({"table_number": table}))
        .collect();
    serde_json::from_value(json!({ "orders": orders })).expect("valid bulk body")
}

/// Builds a status update body.
#[must_use]
pub fn status(value: &str) -> StatusUpdate {
    StatusUpdate {
        status: value.to_owned(),
    }
}
