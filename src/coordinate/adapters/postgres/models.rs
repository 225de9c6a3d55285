//! Diesel row models for coordinate registry persistence.

use super::schema::table_coordinates;
use diesel::prelude::*;

/// Query result row for registry entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = table_coordinates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CoordinateRow {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Unique table label.
    pub table_number: String,
    /// Goal x coordinate.
    pub goal_x: f64,
    /// Goal y coordinate.
    pub goal_y: f64,
    /// Goal heading in radians.
    pub goal_yaw: f64,
}

/// Insert model for registry entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = table_coordinates)]
pub struct NewCoordinateRow {
    /// Unique table label.
    pub table_number: String,
    /// Goal x coordinate.
    pub goal_x: f64,
    /// Goal y coordinate.
    pub goal_y: f64,
    /// Goal heading in radians.
    pub goal_yaw: f64,
}
