//! Order aggregate and intake draft.

use super::{FrameId, GoalId, GoalStatus, NavigationGoal, OrderId, PersistedGoalData};
use crate::coordinate::domain::{GoalPose, TableCoordinate, TableNumber};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order awaiting storage, carrying the coordinate snapshot taken at intake.
///
/// Later edits to the registry never reach an order created from a draft.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    table_number: TableNumber,
    pose: GoalPose,
    frame_id: FrameId,
    created_at: DateTime<Utc>,
}

impl OrderDraft {
    /// Status assigned to the paired goal at creation.
    pub const INITIAL_STATUS: GoalStatus = GoalStatus::Queued;

    /// Snapshots a registry entry into a new draft created at `created_at`.
    ///
    /// Every draft of one batch shares the batch's intake timestamp.
    #[must_use]
    pub fn from_coordinate(coordinate: &TableCoordinate, created_at: DateTime<Utc>) -> Self {
        Self {
            table_number: coordinate.table_number().clone(),
            pose: coordinate.pose(),
            frame_id: FrameId::default(),
            created_at,
        }
    }

    /// Returns the destination table.
    #[must_use]
    pub const fn table_number(&self) -> &TableNumber {
        &self.table_number
    }

    /// Returns the snapshotted pose.
    #[must_use]
    pub const fn pose(&self) -> GoalPose {
        self.pose
    }

    /// Returns the goal's reference frame.
    #[must_use]
    pub const fn frame_id(&self) -> &FrameId {
        &self.frame_id
    }

    /// Returns the intake timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Materializes the order and its queued goal under assigned identifiers.
    #[must_use]
    pub fn into_order(self, order_id: OrderId, goal_id: GoalId) -> Order {
        let goal = NavigationGoal::from_persisted(PersistedGoalData {
            id: goal_id,
            order_id,
            status: Self::INITIAL_STATUS,
            pose: self.pose,
            frame_id: self.frame_id,
            meta: None,
            created_at: self.created_at,
            updated_at: self.created_at,
        });
        Order {
            id: order_id,
            table_number: self.table_number,
            pose: self.pose,
            created_at: self.created_at,
            navigation_goal: Some(goal),
        }
    }
}

/// Client-submitted delivery request for a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    table_number: TableNumber,
    pose: GoalPose,
    created_at: DateTime<Utc>,
    navigation_goal: Option<NavigationGoal>,
}

/// Parameter object for reconstructing a persisted order.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedOrderData {
    /// Persisted order identifier.
    pub id: OrderId,
    /// Destination table.
    pub table_number: TableNumber,
    /// Pose snapshot taken at intake.
    pub pose: GoalPose,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Paired goal loaded alongside the order.
    pub navigation_goal: Option<NavigationGoal>,
}

impl Order {
    /// Reconstructs an order from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedOrderData) -> Self {
        Self {
            id: data.id,
            table_number: data.table_number,
            pose: data.pose,
            created_at: data.created_at,
            navigation_goal: data.navigation_goal,
        }
    }

    /// Returns the order identifier.
    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the destination table.
    #[must_use]
    pub const fn table_number(&self) -> &TableNumber {
        &self.table_number
    }

    /// Returns the pose snapshot taken at intake.
    #[must_use]
    pub const fn pose(&self) -> GoalPose {
        self.pose
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the paired navigation goal.
    #[must_use]
    pub const fn navigation_goal(&self) -> Option<&NavigationGoal> {
        self.navigation_goal.as_ref()
    }

    /// Replaces the attached goal with a freshly persisted copy.
    #[must_use]
    pub fn with_navigation_goal(mut self, goal: NavigationGoal) -> Self {
        self.navigation_goal = Some(goal);
        self
    }

    /// Consumes the order and returns its paired navigation goal.
    #[must_use]
    pub fn into_navigation_goal(self) -> Option<NavigationGoal> {
        self.navigation_goal
    }

    /// Returns the status read through from the paired goal.
    ///
    /// `None` means the pairing invariant is broken.
    #[must_use]
    pub fn status(&self) -> Option<GoalStatus> {
        self.navigation_goal.as_ref().map(NavigationGoal::status)
    }
}
