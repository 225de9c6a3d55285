//! Registry entry types.

use super::{CoordinateId, GoalPose, TableNumber};
use serde::{Deserialize, Serialize};

/// Validated registration awaiting an identifier from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateRegistration {
    table_number: TableNumber,
    pose: GoalPose,
}

impl CoordinateRegistration {
    /// Creates a registration for a table.
    #[must_use]
    pub const fn new(table_number: TableNumber, pose: GoalPose) -> Self {
        Self { table_number, pose }
    }

    /// Returns the table being registered.
    #[must_use]
    pub const fn table_number(&self) -> &TableNumber {
        &self.table_number
    }

    /// Returns the goal pose for the table.
    #[must_use]
    pub const fn pose(&self) -> GoalPose {
        self.pose
    }

    /// Attaches the storage-assigned identifier.
    #[must_use]
    pub fn into_coordinate(self, id: CoordinateId) -> TableCoordinate {
        TableCoordinate {
            id,
            table_number: self.table_number,
            pose: self.pose,
        }
    }
}

/// Persisted registry entry mapping a table to its goal pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCoordinate {
    id: CoordinateId,
    table_number: TableNumber,
    pose: GoalPose,
}

impl TableCoordinate {
    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: CoordinateId,
        table_number: TableNumber,
        pose: GoalPose,
    ) -> Self {
        Self {
            id,
            table_number,
            pose,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> CoordinateId {
        self.id
    }

    /// Returns the table number.
    #[must_use]
    pub const fn table_number(&self) -> &TableNumber {
        &self.table_number
    }

    /// Returns the goal pose.
    #[must_use]
    pub const fn pose(&self) -> GoalPose {
        self.pose
    }
}
