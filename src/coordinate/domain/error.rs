//! Error types for coordinate domain validation.

use thiserror::Error;

/// Errors returned while constructing coordinate domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoordinateDomainError {
    /// The table number is empty after trimming.
    #[error("table number must not be empty")]
    EmptyTableNumber,

    /// The table number exceeds the storage limit.
    #[error("table number exceeds {max} character limit: {value}")]
    TableNumberTooLong {
        /// Rejected value.
        value: String,
        /// Maximum accepted length.
        max: usize,
    },

    /// A pose component is NaN or infinite.
    #[error("goal pose component '{0}' must be a finite number")]
    NonFinitePose(&'static str),
}
