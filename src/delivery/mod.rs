//! Delivery task lifecycle for Table Dispatch.
//!
//! One delivery is stored as an [`domain::Order`] paired 1:1 with a
//! [`domain::NavigationGoal`]. Bulk intake resolves table numbers through the
//! coordinate registry and persists every pair of a batch atomically. Status
//! lives only on the navigation goal; an order's status is read through from
//! its goal. Staff and the robot both write status and the robot writes
//! opaque telemetry into the goal's meta document; concurrent writers follow
//! last-writer-wins, except that under the forward-only policy a status
//! write only lands on the status it was checked against. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
