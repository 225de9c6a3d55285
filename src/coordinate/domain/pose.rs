//! Planar goal pose in the robot's map frame.

use super::CoordinateDomainError;
use serde::{Deserialize, Serialize};

/// Target position and heading for a navigation goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalPose {
    x: f64,
    y: f64,
    yaw: f64,
}

impl GoalPose {
    /// Creates a validated pose.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateDomainError::NonFinitePose`] naming the first
    /// component that is NaN or infinite.
    pub fn new(x: f64, y: f64, yaw: f64) -> Result<Self, CoordinateDomainError> {
        for (axis, value) in [("x", x), ("y", y), ("yaw", yaw)] {
            if !value.is_finite() {
                return Err(CoordinateDomainError::NonFinitePose(axis));
            }
        }
        Ok(Self { x, y, yaw })
    }

    /// Returns the x coordinate.
    #[must_use]
    pub const fn x(self) -> f64 {
        self.x
    }

    /// Returns the y coordinate.
    #[must_use]
    pub const fn y(self) -> f64 {
        self.y
    }

    /// Returns the heading in radians.
    #[must_use]
    pub const fn yaw(self) -> f64 {
        self.yaw
    }
}
