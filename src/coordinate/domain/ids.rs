//! Identifier and validated scalar types for the coordinate registry.

use super::CoordinateDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage-assigned identifier of a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoordinateId(i64);

impl CoordinateId {
    /// Wraps a storage-assigned identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CoordinateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Restaurant table label, unique within the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableNumber(String);

impl TableNumber {
    /// Longest table number representable in the current schema.
    pub const MAX_LENGTH: usize = 64;

    /// Creates a validated table number.
    ///
    /// Surrounding whitespace is trimmed; the label is otherwise kept verbatim
    /// so `"T1"` and `"t1"` are distinct tables.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateDomainError::EmptyTableNumber`] for blank input or
    /// [`CoordinateDomainError::TableNumberTooLong`] when the trimmed value
    /// exceeds [`Self::MAX_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, CoordinateDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoordinateDomainError::EmptyTableNumber);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(CoordinateDomainError::TableNumberTooLong {
                value: raw,
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the table number as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TableNumber {
    type Error = CoordinateDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TableNumber> for String {
    fn from(value: TableNumber) -> Self {
        value.0
    }
}

impl AsRef<str> for TableNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TableNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
