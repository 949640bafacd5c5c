//! Scroll engine: effect execution, geometry observation and surface lifetimes.
mod coordinator;
mod driver;
mod error;
mod loader;
mod registry;
mod surface;

pub use coordinator::LoadCoordinator;
pub use driver::SurfaceDriver;
pub use error::RegistryError;
pub use loader::{FnLoader, FnRefresh, Loader, RefreshAction};
pub use registry::SurfaceRegistry;
pub use surface::{
    GeometryBroadcaster, GeometryCallback, GeometrySource, ScrollSurface, Subscription,
};

/// Stable identifier of a mounted scroll surface.
pub type SurfaceId = u64;
