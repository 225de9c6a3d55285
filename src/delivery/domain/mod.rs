//! Domain model for delivery orders and navigation goals.
//!
//! The delivery domain models order intake snapshots, the goal status state
//! machine, and the robot's telemetry document while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod goal;
mod ids;
mod meta;
mod order;
mod status;

pub use error::{DeliveryDomainError, ParseGoalStatusError, ParseTransitionPolicyError};
pub use goal::{NavigationGoal, PersistedGoalData};
pub use ids::{FrameId, GoalId, OrderId};
pub use meta::GoalMeta;
pub use order::{Order, OrderDraft, PersistedOrderData};
pub use status::{GoalStatus, TransitionPolicy};
