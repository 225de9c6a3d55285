//! Application services for the coordinate registry.

mod registry;

pub use registry::{
    CoordinateRegistryError, CoordinateRegistryResult, CoordinateRegistryService,
    RegisterCoordinateRequest,
};
