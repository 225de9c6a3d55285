//! Structured errors reported across the boundary.

use crate::coordinate::{
    domain::CoordinateDomainError, ports::CoordinateRepositoryError,
    services::CoordinateRegistryError,
};
use crate::delivery::{
    domain::{DeliveryDomainError, ParseGoalStatusError},
    ports::DeliveryRepositoryError,
    services::{BulkIntakeError, GoalLifecycleError},
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Stable machine-readable error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A uniqueness rule was violated.
    DuplicateKey,
    /// The addressed coordinate, order or goal does not exist.
    NotFound,
    /// An order batch named a table with no registered coordinates.
    CoordinateNotFound,
    /// The backing store failed; the caller may retry.
    StorageUnavailable,
    /// The request was malformed.
    InvalidRequest,
    /// The transition policy forbade a status change, or another writer
    /// moved the status first.
    TransitionRejected,
    /// Stored data was unreadable or an invariant was broken.
    Internal,
}

impl ErrorCode {
    /// Returns the wire name of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateKey => "duplicate_key",
            Self::NotFound => "not_found",
            Self::CoordinateNotFound => "coordinate_not_found",
            Self::StorageUnavailable => "storage_unavailable",
            Self::InvalidRequest => "invalid_request",
            Self::TransitionRejected => "transition_rejected",
            Self::Internal => "internal",
        }
    }

    /// Returns the HTTP status the collaborator should answer with.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::DuplicateKey => 400,
            Self::NotFound | Self::CoordinateNotFound => 404,
            Self::TransitionRejected => 409,
            Self::InvalidRequest => 422,
            Self::Internal => 500,
            Self::StorageUnavailable => 503,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error body returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    /// Classification of the failure.
    pub code: ErrorCode,
    /// Human-readable detail.
    pub message: String,
}

/// Result type for boundary operations.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Creates an error with the given code and message.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Returns the HTTP status the collaborator should answer with.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    fn from_display(code: ErrorCode, err: &impl fmt::Display) -> Self {
        Self::new(code, err.to_string())
    }
}

impl From<CoordinateDomainError> for ApiError {
    fn from(err: CoordinateDomainError) -> Self {
        Self::from_display(ErrorCode::InvalidRequest, &err)
    }
}

impl From<ParseGoalStatusError> for ApiError {
    fn from(err: ParseGoalStatusError) -> Self {
        Self::from_display(ErrorCode::InvalidRequest, &err)
    }
}

impl From<DeliveryDomainError> for ApiError {
    fn from(err: DeliveryDomainError) -> Self {
        let code = match err {
            DeliveryDomainError::EmptyFrameId => ErrorCode::InvalidRequest,
            DeliveryDomainError::TransitionRejected { .. } => ErrorCode::TransitionRejected,
        };
        Self::from_display(code, &err)
    }
}

impl From<CoordinateRepositoryError> for ApiError {
    fn from(err: CoordinateRepositoryError) -> Self {
        let code = match err {
            CoordinateRepositoryError::DuplicateTableNumber(_) => ErrorCode::DuplicateKey,
            CoordinateRepositoryError::InvalidPersistedData(_) => ErrorCode::Internal,
            CoordinateRepositoryError::Unavailable(_) => ErrorCode::StorageUnavailable,
        };
        Self::from_display(code, &err)
    }
}

impl From<DeliveryRepositoryError> for ApiError {
    fn from(err: DeliveryRepositoryError) -> Self {
        let code = match err {
            DeliveryRepositoryError::OrderNotFound(_)
            | DeliveryRepositoryError::GoalNotFound(_) => ErrorCode::NotFound,
            DeliveryRepositoryError::StatusConflict { .. } => ErrorCode::TransitionRejected,
            DeliveryRepositoryError::InvalidPersistedData(_) => ErrorCode::Internal,
            DeliveryRepositoryError::Unavailable(_) => ErrorCode::StorageUnavailable,
        };
        Self::from_display(code, &err)
    }
}

impl From<CoordinateRegistryError> for ApiError {
    fn from(err: CoordinateRegistryError) -> Self {
        match err {
            CoordinateRegistryError::Domain(inner) => inner.into(),
            CoordinateRegistryError::Repository(inner) => inner.into(),
            CoordinateRegistryError::NotFound(_) => Self::from_display(ErrorCode::NotFound, &err),
        }
    }
}

impl From<BulkIntakeError> for ApiError {
    fn from(err: BulkIntakeError) -> Self {
        match err {
            BulkIntakeError::Domain(inner) => inner.into(),
            BulkIntakeError::EmptyBatch => Self::from_display(ErrorCode::InvalidRequest, &err),
            BulkIntakeError::CoordinateNotFound(_) => {
                Self::from_display(ErrorCode::CoordinateNotFound, &err)
            }
            BulkIntakeError::Coordinates(inner) => inner.into(),
            BulkIntakeError::Repository(inner) => inner.into(),
        }
    }
}

impl From<GoalLifecycleError> for ApiError {
    fn from(err: GoalLifecycleError) -> Self {
        match err {
            GoalLifecycleError::Domain(inner) => inner.into(),
            GoalLifecycleError::Repository(inner) => inner.into(),
            GoalLifecycleError::GoalNotFound(_) | GoalLifecycleError::OrderNotFound(_) => {
                Self::from_display(ErrorCode::NotFound, &err)
            }
            GoalLifecycleError::OrderWithoutGoal(_) => {
                Self::from_display(ErrorCode::Internal, &err)
            }
        }
    }
}
