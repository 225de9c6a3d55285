//! Domain model for the coordinate registry.

mod coordinate;
mod error;
mod ids;
mod pose;

pub use coordinate::{CoordinateRegistration, TableCoordinate};
pub use error::CoordinateDomainError;
pub use ids::{CoordinateId, TableNumber};
pub use pose::GoalPose;
