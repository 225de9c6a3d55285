//! Storage adapters for delivery tasks.

pub mod memory;
pub mod postgres;
