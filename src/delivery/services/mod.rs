//! Application services for delivery intake and lifecycle orchestration.

mod intake;
mod lifecycle;

pub use intake::{
    BulkIntakeError, BulkIntakeResult, BulkIntakeService, CreateOrderBatchRequest,
};
pub use lifecycle::{GoalLifecycleError, GoalLifecycleResult, GoalLifecycleService};
