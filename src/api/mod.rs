//! Boundary consumed by the HTTP collaborator.
//!
//! Requests arrive as strongly typed bodies, are validated into domain values
//! before any service runs, and every failure leaves as an [`ApiError`]
//! carrying a stable code and a human-readable message. Nothing here retries;
//! transient storage failures are reported as `storage_unavailable`.

mod dto;
mod error;
mod facade;

pub use dto::{
    GoalListQuery, ListQuery, MetaUpdate, NavigationGoalResponse, OrderCreate, OrderCreateBulk,
    OrderResponse, StatusUpdate, TableCoordinateCreate, TableCoordinateResponse,
};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use facade::{DispatchApi, PostgresDispatchApi};

#[cfg(test)]
mod tests;
