//! Coordinate registry: the master mapping from table number to goal pose.
//!
//! Entries are registered once per table by an operator and read by bulk
//! intake when orders are created. Table numbers are unique; a second
//! registration for the same table is rejected. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
