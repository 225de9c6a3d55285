//! Storage adapters for the coordinate registry.

pub mod memory;
pub mod postgres;
