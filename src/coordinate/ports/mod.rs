//! Port contracts for the coordinate registry.
//!
//! Ports define infrastructure-agnostic interfaces used by registry services.

pub mod repository;

pub use repository::{CoordinateRepository, CoordinateRepositoryError, CoordinateRepositoryResult};
