use thiserror::Error;

use crate::SurfaceId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("surface {0} is already mounted")]
    AlreadyMounted(SurfaceId),
    #[error("surface {0} is not mounted")]
    UnknownSurface(SurfaceId),
}
