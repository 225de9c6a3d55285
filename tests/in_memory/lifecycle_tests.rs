//! Staff and robot interaction through the public boundary.

use super::helpers::{MemoryApi, bulk, restaurant, status};
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;
use table_dispatch::api::{ErrorCode, GoalListQuery, ListQuery, MetaUpdate};

fn meta(document: serde_json::Value) -> MetaUpdate {
    serde_json::from_value(json!({ "meta": document })).expect("valid meta body")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn robot_drains_queue_in_arrival_order(#[future] restaurant: MemoryApi) {
    let api = restaurant.await;
    api.create_order_batch(bulk(&["T1", "T2"])).await.expect("batch");
    api.create_order_batch(bulk(&["T3"])).await.expect("batch");

    let mut served = Vec::new();
    loop {
        let queued = api
            .list_goals(GoalListQuery {
                status: Some("queued".to_owned()),
                skip: 0,
                limit: Some(1),
            })
            .await
            .expect("poll");
        let Some(next) = queued.first() else {
            break;
        };
        api.set_goal_status(next.id, status("ready"))
            .await
            .expect("robot accepts goal");
        api.set_goal_status(next.id, status("succeeded"))
            .await
            .expect("robot completes goal");
        served.push(next.goal_x);
    }

    assert_eq!(served, vec![1.0, 3.0, 5.0]);
    let orders = api.list_orders(ListQuery::default()).await.expect("list");
    assert!(orders.iter().all(|order| order.status == "succeeded"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn staff_can_reset_goal_under_default_policy(#[future] restaurant: MemoryApi) {
    let api = restaurant.await;
    let orders = api.create_order_batch(bulk(&["T1"])).await.expect("batch");
    let order = orders.first().expect("one order");

    api.set_order_status(order.id, status("succeeded"))
        .await
        .expect("staff completes");
    let reset = api
        .set_order_status(order.id, status("queued"))
        .await
        .expect("staff resets");

    assert_eq!(reset.status, "queued");
    let polled = api
        .list_goals(GoalListQuery {
            status: Some("queued".to_owned()),
            ..GoalListQuery::default()
        })
        .await
        .expect("poll");
    assert_eq!(polled.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn telemetry_is_replaced_not_merged(#[future] restaurant: MemoryApi) {
    let api = restaurant.await;
    let orders = api.create_order_batch(bulk(&["T2"])).await.expect("batch");
    let goal_id = orders
        .first()
        .and_then(|order| order.navigation_goal_id)
        .expect("goal paired");

    api.set_goal_meta(goal_id, meta(json!({"battery": 87})))
        .await
        .expect("meta write");
    let goal = api
        .set_goal_meta(goal_id, meta(json!({"temp": 20})))
        .await
        .expect("meta write");

    assert_eq!(goal.meta, json!({"temp": 20}).as_object().cloned());
    assert_eq!(goal.status, "queued");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_staff_and_robot_writes_both_land(#[future] restaurant: MemoryApi) {
    let api = Arc::new(restaurant.await);
    let orders = api.create_order_batch(bulk(&["T1"])).await.expect("batch");
    let order = orders.first().expect("one order").clone();
    let goal_id = order.navigation_goal_id.expect("goal paired");

    let staff = {
        let api = Arc::clone(&api);
        tokio::spawn(async move { api.set_order_status(order.id, status("succeeded")).await })
    };
    let robot = {
        let api = Arc::clone(&api);
        tokio::spawn(async move { api.set_goal_meta(goal_id, meta(json!({"battery": 40}))).await })
    };
    staff.await.expect("joined").expect("staff write");
    robot.await.expect("joined").expect("robot write");

    let goal = api.get_goal(goal_id).await.expect("goal exists");
    assert_eq!(goal.status, "succeeded");
    assert_eq!(goal.meta, json!({"battery": 40}).as_object().cloned());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_ids_are_not_found(#[future] restaurant: MemoryApi) {
    let api = restaurant.await;

    let order = api.get_order(404).await.expect_err("missing order");
    let goal = api
        .set_goal_status(404, status("ready"))
        .await
        .expect_err("missing goal");

    assert_eq!(order.code, ErrorCode::NotFound);
    assert_eq!(goal.code, ErrorCode::NotFound);
    assert_eq!(goal.http_status(), 404);
}
