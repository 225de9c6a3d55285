//! Navigation goal aggregate: the unit of work the robot acts on.

use super::{DeliveryDomainError, FrameId, GoalId, GoalMeta, GoalStatus, OrderId, TransitionPolicy};
use crate::coordinate::domain::GoalPose;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Robot-facing task derived from an order.
///
/// The goal is the only place delivery status is stored. Every mutation bumps
/// `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationGoal {
    id: GoalId,
    order_id: OrderId,
    status: GoalStatus,
    pose: GoalPose,
    frame_id: FrameId,
    meta: Option<GoalMeta>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted navigation goal.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedGoalData {
    /// Persisted goal identifier.
    pub id: GoalId,
    /// Owning order.
    pub order_id: OrderId,
    /// Persisted lifecycle status.
    pub status: GoalStatus,
    /// Pose copied from the order at creation.
    pub pose: GoalPose,
    /// Spatial reference frame.
    pub frame_id: FrameId,
    /// Robot telemetry document, if any has been written.
    pub meta: Option<GoalMeta>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<NavigationGoal> for PersistedGoalData {
    fn from(goal: NavigationGoal) -> Self {
        Self {
            id: goal.id,
            order_id: goal.order_id,
            status: goal.status,
            pose: goal.pose,
            frame_id: goal.frame_id,
            meta: goal.meta,
            created_at: goal.created_at,
            updated_at: goal.updated_at,
        }
    }
}

impl NavigationGoal {
    /// Reconstructs a goal from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedGoalData) -> Self {
        Self {
            id: data.id,
            order_id: data.order_id,
            status: data.status,
            pose: data.pose,
            frame_id: data.frame_id,
            meta: data.meta,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the goal identifier.
    #[must_use]
    pub const fn id(&self) -> GoalId {
        self.id
    }

    /// Returns the owning order identifier.
    #[must_use]
    pub const fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> GoalStatus {
        self.status
    }

    /// Returns the goal pose.
    #[must_use]
    pub const fn pose(&self) -> GoalPose {
        self.pose
    }

    /// Returns the spatial reference frame.
    #[must_use]
    pub const fn frame_id(&self) -> &FrameId {
        &self.frame_id
    }

    /// Returns the robot telemetry document, if any.
    #[must_use]
    pub const fn meta(&self) -> Option<&GoalMeta> {
        self.meta.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Writes a new lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryDomainError::TransitionRejected`] when `policy` does
    /// not permit moving from the current status to `status`. The goal is
    /// left unchanged in that case.
    pub fn set_status(
        &mut self,
        status: GoalStatus,
        policy: TransitionPolicy,
        clock: &impl Clock,
    ) -> Result<(), DeliveryDomainError> {
        if !policy.permits(self.status, status) {
            return Err(DeliveryDomainError::TransitionRejected {
                goal_id: self.id,
                from: self.status,
                to: status,
            });
        }
        self.status = status;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the telemetry document wholesale; keys are never merged.
    pub fn replace_meta(&mut self, meta: GoalMeta, clock: &impl Clock) {
        self.meta = Some(meta);
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
