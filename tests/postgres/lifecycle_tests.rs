//! Goal lifecycle persistence against `PostgreSQL`.

use super::helpers::{BoxError, PgApi, PreparedStore, or_skip, prepared_store};
use eyre::{OptionExt, ensure};
use rstest::rstest;
use serde_json::json;
use table_dispatch::api::{
    ErrorCode, GoalListQuery, ListQuery, MetaUpdate, OrderCreate, OrderCreateBulk, StatusUpdate,
    TableCoordinateCreate,
};
use mockable::DefaultClock;
use table_dispatch::delivery::domain::{GoalId, GoalStatus, TransitionPolicy};
use table_dispatch::delivery::ports::{DeliveryRepository, DeliveryRepositoryError};

async fn seed(api: &PgApi, tables: &[&str]) -> eyre::Result<Vec<i64>> {
    for (index, table) in ["T1", "T2", "T3"].into_iter().enumerate() {
        api.register_coordinate(TableCoordinateCreate {
            table_number: table.to_owned(),
            goal_x: f64::from(u8::try_from(index)?),
            goal_y: 0.0,
            goal_yaw: 0.0,
        })
        .await?;
    }
    let mut goal_ids = Vec::new();
    for table in tables {
        let created = api
            .create_order_batch(OrderCreateBulk {
                orders: vec![OrderCreate {
                    table_number: (*table).to_owned(),
                }],
            })
            .await?;
        for order in created {
            goal_ids.push(order.navigation_goal_id.ok_or_eyre("goal paired")?);
        }
    }
    Ok(goal_ids)
}

fn status(value: &str) -> StatusUpdate {
    StatusUpdate {
        status: value.to_owned(),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn meta_write_does_not_touch_status(
    prepared_store: Result<PreparedStore, BoxError>,
) -> eyre::Result<()> {
    let Some(store) = or_skip(prepared_store) else {
        return Ok(());
    };
    let api = store.api(TransitionPolicy::Permissive);
    let goal_ids = seed(&api, &["T1"]).await?;
    let goal_id = *goal_ids.first().ok_or_eyre("one goal")?;

    api.set_goal_status(goal_id, status("ready")).await?;
    let meta: MetaUpdate = serde_json::from_value(json!({"meta": {"battery": 87}}))?;
    let after_meta = api.set_goal_meta(goal_id, meta).await?;
    let replacement: MetaUpdate = serde_json::from_value(json!({"meta": {"temp": 20}}))?;
    let replaced = api.set_goal_meta(goal_id, replacement).await?;

    ensure!(after_meta.status == "ready", "status kept after meta write");
    ensure!(replaced.meta == json!({"temp": 20}).as_object().cloned());
    ensure!(replaced.updated_at >= replaced.created_at);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn polling_is_fifo_and_listing_is_newest_first(
    prepared_store: Result<PreparedStore, BoxError>,
) -> eyre::Result<()> {
    let Some(store) = or_skip(prepared_store) else {
        return Ok(());
    };
    let api = store.api(TransitionPolicy::Permissive);
    let goal_ids = seed(&api, &["T1", "T2", "T3"]).await?;
    api.set_goal_status(*goal_ids.first().ok_or_eyre("goal")?, status("ready"))
        .await?;

    let queued = api
        .list_goals(GoalListQuery {
            status: Some("queued".to_owned()),
            ..GoalListQuery::default()
        })
        .await?;
    let orders = api.list_orders(ListQuery::default()).await?;

    let queued_ids: Vec<i64> = queued.iter().map(|goal| goal.id).collect();
    ensure!(queued_ids == goal_ids.get(1..).unwrap_or_default().to_vec());
    let tables: Vec<&str> = orders.iter().map(|order| order.table_number.as_str()).collect();
    ensure!(tables == vec!["T3", "T2", "T1"], "unexpected order {tables:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_cascades_to_goal(
    prepared_store: Result<PreparedStore, BoxError>,
) -> eyre::Result<()> {
    let Some(store) = or_skip(prepared_store) else {
        return Ok(());
    };
    let api = store.api(TransitionPolicy::Permissive);
    seed(&api, &["T1"]).await?;
    let orders = api.list_orders(ListQuery::default()).await?;
    let order = orders.first().ok_or_eyre("one order")?;

    api.delete_order(order.id).await?;

    let goal_id = order.navigation_goal_id.ok_or_eyre("goal paired")?;
    let err = api.get_goal(goal_id).await.expect_err("goal removed");
    ensure!(err.code == ErrorCode::NotFound);
    let again = api.delete_order(order.id).await.expect_err("already gone");
    ensure!(again.code == ErrorCode::NotFound);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn forward_only_rejects_regression_in_storage(
    prepared_store: Result<PreparedStore, BoxError>,
) -> eyre::Result<()> {
    let Some(store) = or_skip(prepared_store) else {
        return Ok(());
    };
    let api = store.api(TransitionPolicy::ForwardOnly);
    let goal_ids = seed(&api, &["T1"]).await?;
    let goal_id = *goal_ids.first().ok_or_eyre("one goal")?;
    api.set_goal_status(goal_id, status("succeeded")).await?;

    let err = api
        .set_goal_status(goal_id, status("queued"))
        .await
        .expect_err("regression rejected");

    ensure!(err.code == ErrorCode::TransitionRejected);
    ensure!(api.get_goal(goal_id).await?.status == "succeeded");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn conditional_status_write_refuses_moved_goal(
    prepared_store: Result<PreparedStore, BoxError>,
) -> eyre::Result<()> {
    let Some(store) = or_skip(prepared_store) else {
        return Ok(());
    };
    let api = store.api(TransitionPolicy::Permissive);
    let goal_ids = seed(&api, &["T1"]).await?;
    let goal_id = GoalId::new(*goal_ids.first().ok_or_eyre("one goal")?);

    let mut stale = store
        .deliveries
        .find_goal(goal_id)
        .await?
        .ok_or_eyre("goal stored")?;
    api.set_goal_status(goal_id.value(), status("succeeded")).await?;
    stale.set_status(GoalStatus::Ready, TransitionPolicy::ForwardOnly, &DefaultClock)?;

    let result = store
        .deliveries
        .update_goal_status(&stale, Some(GoalStatus::Queued))
        .await;

    ensure!(
        matches!(
            result,
            Err(DeliveryRepositoryError::StatusConflict {
                expected: GoalStatus::Queued,
                actual: GoalStatus::Succeeded,
                ..
            })
        ),
        "stale conditional write must be refused"
    );
    let stored = api.get_goal(goal_id.value()).await?;
    ensure!(stored.status == "succeeded");
    Ok(())
}
