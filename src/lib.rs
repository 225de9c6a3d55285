//! Table dispatch: delivery task coordination for a table-service robot.
//!
//! Staff submit orders for restaurant tables, each order is resolved to a goal
//! pose from the coordinate registry, and the robot drains a queue of
//! navigation goals. One delivery is represented by an order paired 1:1 with a
//! navigation goal; the goal owns the lifecycle status and the order's status
//! is read through from it.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage collaborators
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`coordinate`]: Table number to goal pose registry
//! - [`delivery`]: Orders, navigation goals, bulk intake and status lifecycle
//! - [`api`]: Typed boundary used by the HTTP collaborator
//! - [`config`]: Startup configuration
//! - [`storage`]: Shared `PostgreSQL` pool helpers

pub mod api;
pub mod config;
pub mod coordinate;
pub mod delivery;
pub mod page;
pub mod storage;
