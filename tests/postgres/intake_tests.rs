//! Atomic bulk intake against `PostgreSQL`.

use super::helpers::{BoxError, PreparedStore, or_skip, prepared_store};
use eyre::{OptionExt, ensure};
use rstest::rstest;
use serde_json::json;
use table_dispatch::api::{ErrorCode, ListQuery, OrderCreateBulk, TableCoordinateCreate};
use table_dispatch::delivery::domain::TransitionPolicy;

fn bulk(tables: &[&str]) -> eyre::Result<OrderCreateBulk> {
    let orders: Vec<_> = tables
        .iter()
        .map(|table| json!({"table_number": table}))
        .collect();
    Ok(serde_json::from_value(json!({ "orders": orders }))?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batch_persists_pairs_with_shared_timestamp(
    prepared_store: Result<PreparedStore, BoxError>,
) -> eyre::Result<()> {
    let Some(store) = or_skip(prepared_store) else {
        return Ok(());
    };
    let api = store.api(TransitionPolicy::Permissive);
    for (table, x) in [("T1", 1.0), ("T2", 3.0)] {
        api.register_coordinate(TableCoordinateCreate {
            table_number: table.to_owned(),
            goal_x: x,
            goal_y: 2.0,
            goal_yaw: 0.0,
        })
        .await?;
    }

    let created = api.create_order_batch(bulk(&["T1", "T2", "T1"])?).await?;

    ensure!(created.len() == 3, "one order per entry");
    let first = created.first().ok_or_eyre("first order")?;
    ensure!(created.iter().all(|order| order.created_at == first.created_at));
    ensure!(created.iter().all(|order| order.status == "queued"));
    for order in &created {
        let goal_id = order.navigation_goal_id.ok_or_eyre("goal paired")?;
        let goal = api.get_goal(goal_id).await?;
        ensure!(goal.order_id == order.id);
        ensure!(goal.goal_x == order.goal_x && goal.goal_y == order.goal_y);
        ensure!(goal.frame_id == "map");
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batch_with_unknown_table_leaves_no_rows(
    prepared_store: Result<PreparedStore, BoxError>,
) -> eyre::Result<()> {
    let Some(store) = or_skip(prepared_store) else {
        return Ok(());
    };
    let api = store.api(TransitionPolicy::Permissive);
    api.register_coordinate(TableCoordinateCreate {
        table_number: "T1".to_owned(),
        goal_x: 1.0,
        goal_y: 2.0,
        goal_yaw: 0.0,
    })
    .await?;

    let err = api
        .create_order_batch(bulk(&["T1", "UNKNOWN"])?)
        .await
        .expect_err("batch rejected");

    ensure!(err.code == ErrorCode::CoordinateNotFound);
    ensure!(api.list_orders(ListQuery::default()).await?.is_empty());
    Ok(())
}
