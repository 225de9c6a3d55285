//! When steps for delivery lifecycle BDD scenarios.

use super::world::{DeliveryWorld, run_async, split_tables};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use table_dispatch::api::{MetaUpdate, OrderCreate, OrderCreateBulk, StatusUpdate};

#[when(r#"staff submit orders for tables "{tables}""#)]
fn staff_submit_orders(world: &mut DeliveryWorld, tables: String) {
    let body = OrderCreateBulk {
        orders: split_tables(&tables)
            .into_iter()
            .map(|table| OrderCreate {
                table_number: table.to_owned(),
            })
            .collect(),
    };
    let result = run_async(world.api.create_order_batch(body));
    if let Ok(created) = &result {
        world.created.extend(created.iter().cloned());
    }
    world.last_batch = Some(result);
}

#[when(r#"the robot reports status "{status}" for goal {position:u64}"#)]
fn robot_reports_status(
    world: &mut DeliveryWorld,
    status: String,
    position: u64,
) -> Result<(), eyre::Report> {
    let goal_id = world.goal_id_at(position)?;
    let result = run_async(world.api.set_goal_status(goal_id, StatusUpdate { status }));
    world.last_status_write = Some(result);
    Ok(())
}

#[when(r#"the robot writes telemetry '{document}' for goal {position:u64}"#)]
fn robot_writes_telemetry(
    world: &mut DeliveryWorld,
    document: String,
    position: u64,
) -> Result<(), eyre::Report> {
    let goal_id = world.goal_id_at(position)?;
    let meta = serde_json::from_str(&document).wrap_err("parse telemetry document")?;
    run_async(world.api.set_goal_meta(goal_id, MetaUpdate { meta }))
        .wrap_err("write telemetry")?;
    Ok(())
}
