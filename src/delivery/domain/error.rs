//! Error types for delivery domain validation and parsing.

use super::{GoalId, GoalStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating delivery domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryDomainError {
    /// The spatial frame identifier is empty after trimming.
    #[error("frame id must not be empty")]
    EmptyFrameId,

    /// The configured transition policy forbids the requested status change.
    #[error("navigation goal {goal_id} cannot move from {from} to {to}")]
    TransitionRejected {
        /// Goal whose status change was rejected.
        goal_id: GoalId,
        /// Current status.
        from: GoalStatus,
        /// Requested status.
        to: GoalStatus,
    },
}

/// Error returned while parsing goal status values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown goal status: {0}")]
pub struct ParseGoalStatusError(pub String);

/// Error returned while parsing transition policy names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown transition policy: {0}")]
pub struct ParseTransitionPolicyError(pub String);
