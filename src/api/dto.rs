//! Request and response bodies exchanged with the HTTP collaborator.

use crate::coordinate::domain::TableCoordinate;
use crate::delivery::domain::{NavigationGoal, Order};
use crate::page::Page;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body for registering a table's goal pose.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableCoordinateCreate {
    /// Table label.
    pub table_number: String,
    /// Goal x coordinate.
    pub goal_x: f64,
    /// Goal y coordinate.
    pub goal_y: f64,
    /// Goal heading in radians.
    pub goal_yaw: f64,
}

/// One entry of a bulk order request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderCreate {
    /// Destination table label.
    pub table_number: String,
}

/// Body for atomic bulk order creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderCreateBulk {
    /// Orders to create, in order.
    pub orders: Vec<OrderCreate>,
}

/// Body for status writes by staff or robot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusUpdate {
    /// Requested status name.
    pub status: String,
}

/// Body for the robot's telemetry writes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetaUpdate {
    /// Replacement telemetry document.
    pub meta: Map<String, Value>,
}

/// Pagination query for order and coordinate listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListQuery {
    /// Records to skip.
    #[serde(default)]
    pub skip: u32,
    /// Maximum records to return.
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ListQuery {
    pub(crate) fn page(self) -> Page {
        Page::new(self.skip, self.limit.unwrap_or(Page::DEFAULT_LIMIT))
    }
}

/// Query for the robot's goal polling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoalListQuery {
    /// Status filter; all goals when absent.
    #[serde(default)]
    pub status: Option<String>,
    /// Records to skip.
    #[serde(default)]
    pub skip: u32,
    /// Maximum records to return.
    #[serde(default)]
    pub limit: Option<u32>,
}

impl GoalListQuery {
    pub(crate) fn page(&self) -> Page {
        Page::new(
            self.skip,
            self.limit.unwrap_or(Page::DEFAULT_GOAL_POLL_LIMIT),
        )
    }
}

/// Registry entry as reported to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCoordinateResponse {
    /// Entry identifier.
    pub id: i64,
    /// Table label.
    pub table_number: String,
    /// Goal x coordinate.
    pub goal_x: f64,
    /// Goal y coordinate.
    pub goal_y: f64,
    /// Goal heading in radians.
    pub goal_yaw: f64,
}

impl From<&TableCoordinate> for TableCoordinateResponse {
    fn from(coordinate: &TableCoordinate) -> Self {
        let pose = coordinate.pose();
        Self {
            id: coordinate.id().value(),
            table_number: coordinate.table_number().as_str().to_owned(),
            goal_x: pose.x(),
            goal_y: pose.y(),
            goal_yaw: pose.yaw(),
        }
    }
}

/// Order as reported to clients, with status read through from its goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderResponse {
    /// Order identifier.
    pub id: i64,
    /// Destination table label.
    pub table_number: String,
    /// Status of the paired goal, or `"unknown"` when the pairing is broken.
    pub status: String,
    /// Identifier of the paired goal.
    pub navigation_goal_id: Option<i64>,
    /// Goal x coordinate snapshot.
    pub goal_x: f64,
    /// Goal y coordinate snapshot.
    pub goal_y: f64,
    /// Goal heading snapshot.
    pub goal_yaw: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl OrderResponse {
    /// Status reported for an order whose goal is missing.
    pub const UNKNOWN_STATUS: &'static str = "unknown";
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        let pose = order.pose();
        Self {
            id: order.id().value(),
            table_number: order.table_number().as_str().to_owned(),
            status: order
                .status()
                .map_or(Self::UNKNOWN_STATUS, |status| status.as_str())
                .to_owned(),
            navigation_goal_id: order.navigation_goal().map(|goal| goal.id().value()),
            goal_x: pose.x(),
            goal_y: pose.y(),
            goal_yaw: pose.yaw(),
            created_at: order.created_at(),
        }
    }
}

/// Navigation goal as reported to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationGoalResponse {
    /// Goal identifier.
    pub id: i64,
    /// Owning order identifier.
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
    /// Robot telemetry, if any has been written.
    pub meta: Option<Map<String, Value>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&NavigationGoal> for NavigationGoalResponse {
    fn from(goal: &NavigationGoal) -> Self {
        let pose = goal.pose();
        Self {
            id: goal.id().value(),
            order_id: goal.order_id().value(),
            status: goal.status().as_str().to_owned(),
            goal_x: pose.x(),
            goal_y: pose.y(),
            goal_yaw: pose.yaw(),
            frame_id: goal.frame_id().as_str().to_owned(),
            meta: goal.meta().map(|meta| meta.as_map().clone()),
            created_at: goal.created_at(),
            updated_at: goal.updated_at(),
        }
    }
}
