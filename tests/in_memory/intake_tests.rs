//! Registry and bulk intake through the public boundary.

use super::helpers::{MemoryApi, TABLES, bulk, empty_api, restaurant};
use rstest::rstest;
use table_dispatch::api::{ErrorCode, ListQuery, TableCoordinateCreate};
use table_dispatch::delivery::domain::TransitionPolicy;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_tables_are_listed_in_order(#[future] restaurant: MemoryApi) {
    let api = restaurant.await;

    let listed = api
        .list_coordinates(ListQuery::default())
        .await
        .expect("list");

    let names: Vec<&str> = listed.iter().map(|c| c.table_number.as_str()).collect();
    let expected: Vec<&str> = TABLES.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_finite_pose_is_invalid_request() {
    let api = empty_api(TransitionPolicy::Permissive);

    let err = api
        .register_coordinate(TableCoordinateCreate {
            table_number: "T9".to_owned(),
            goal_x: 0.0,
            goal_y: f64::INFINITY,
            goal_yaw: 0.0,
        })
        .await
        .expect_err("pose rejected");

    assert_eq!(err.code, ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_order_pairs_with_goal_at_table_pose(#[future] restaurant: MemoryApi) {
    let api = restaurant.await;

    let orders = api
        .create_order_batch(bulk(&["T3", "T1", "T2"]))
        .await
        .expect("batch");

    for order in &orders {
        let goal_id = order.navigation_goal_id.expect("goal paired");
        let goal = api.get_goal(goal_id).await.expect("goal exists");
        let (_, x) = TABLES
            .iter()
            .find(|(name, _)| *name == order.table_number)
            .expect("registered table");
        assert_eq!(goal.order_id, order.id);
        assert_eq!(goal.goal_x, *x);
        assert_eq!(goal.status, "queued");
        assert_eq!(order.status, "queued");
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_batch_leaves_no_partial_orders(#[future] restaurant: MemoryApi) {
    let api = restaurant.await;
    api.create_order_batch(bulk(&["T1"])).await.expect("batch");

    let err = api
        .create_order_batch(bulk(&["T2", "T3", "T4"]))
        .await
        .expect_err("batch rejected");

    assert_eq!(err.code, ErrorCode::CoordinateNotFound);
    assert!(err.message.contains("T4"));
    let orders = api.list_orders(ListQuery::default()).await.expect("list");
    assert_eq!(orders.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_batch_is_invalid_request(#[future] restaurant: MemoryApi) {
    let api = restaurant.await;

    let err = api
        .create_order_batch(bulk(&[]))
        .await
        .expect_err("empty batch rejected");

    assert_eq!(err.code, ErrorCode::InvalidRequest);
    assert_eq!(err.http_status(), 422);
}
