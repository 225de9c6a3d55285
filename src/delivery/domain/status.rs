//! Navigation goal lifecycle status and transition policy.

use super::{ParseGoalStatusError, ParseTransitionPolicyError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a navigation goal.
///
/// Staff move a goal from `Queued` to `Ready` once the order is picked; the
/// robot moves it from `Ready` to `Succeeded` after delivery and may also
/// pick it up from the queue itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    /// Created by intake and waiting for the order to be prepared.
    Queued,
    /// Prepared and available for the robot to deliver.
    Ready,
    /// Delivered; terminal.
    Succeeded,
}

impl GoalStatus {
    /// Every status in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Queued, Self::Ready, Self::Succeeded];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Ready => "ready",
            Self::Succeeded => "succeeded",
        }
    }

    /// Returns `true` when no further lifecycle progress is expected.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded)
    }

    const fn rank(self) -> u8 {
        match self {
            Self::Queued => 0,
            Self::Ready => 1,
            Self::Succeeded => 2,
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for GoalStatus {
    type Error = ParseGoalStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "queued" => Ok(Self::Queued),
            "ready" => Ok(Self::Ready),
            "succeeded" => Ok(Self::Succeeded),
            _ => Err(ParseGoalStatusError(value.to_owned())),
        }
    }
}

/// Rule set deciding which status writes are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Any status may replace any other, including moving backwards.
    #[default]
    Permissive,
    /// Status may only move forward through the lifecycle. Writing the
    /// current status again is accepted so robot retries stay idempotent.
    /// Writes are conditional on the stored status, so a racing writer
    /// cannot slip a regression past the check.
    ForwardOnly,
}

impl TransitionPolicy {
    /// Returns the canonical configuration representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Permissive => "permissive",
            Self::ForwardOnly => "forward_only",
        }
    }

    /// Returns `true` when the policy accepts moving from `from` to `to`.
    #[must_use]
    pub const fn permits(self, from: GoalStatus, to: GoalStatus) -> bool {
        match self {
            Self::Permissive => true,
            Self::ForwardOnly => to.rank() >= from.rank(),
        }
    }
}

impl fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TransitionPolicy {
    type Error = ParseTransitionPolicyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "permissive" => Ok(Self::Permissive),
            "forward_only" => Ok(Self::ForwardOnly),
            _ => Err(ParseTransitionPolicyError(value.to_owned())),
        }
    }
}
