//! Diesel row models for delivery task persistence.

use super::schema::{navigation_goals, orders};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for orders.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Destination table label.
    pub table_number: String,
    /// Goal x coordinate snapshot.
    pub goal_x: f64,
    /// Goal y coordinate snapshot.
    pub goal_y: f64,
    /// Goal heading snapshot.
    pub goal_yaw: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for orders.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    /// Destination table label.
    pub table_number: String,
    /// Goal x coordinate snapshot.
    pub goal_x: f64,
    /// Goal y coordinate snapshot.
    pub goal_y: f64,
    /// Goal heading snapshot.
    pub goal_yaw: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for navigation goals.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = navigation_goals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GoalRow {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Owning order.
    pub order_id: i64,
    /// Lifecycle status.
    pub status: String,
    /// Goal x coordinate.
    pub goal_x: f64,
    /// Goal y coordinate.
    pub goal_y: f64,
    /// Goal heading.
    pub goal_yaw: f64,
    /// Spatial reference frame.
    pub frame_id: String,
    /// Opaque robot telemetry.
    pub meta: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for navigation goals.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = navigation_goals)]
pub struct NewGoalRow {
    /// Owning order.
    pub order_id: i64,
    /// Lifecycle status.
    pub status: String,
    /// Goal x coordinate.
    pub goal_x: f64,
    /// Goal y coordinate.
    pub goal_y: f64,
    /// Goal heading.
    pub goal_yaw: f64,
    /// Spatial reference frame.
    pub frame_id: String,
    /// Opaque robot telemetry.
    pub meta: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}
