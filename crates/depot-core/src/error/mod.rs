//! Domain-level error types.

mod code;
mod descriptor;
pub mod registry;
pub mod taxonomy;

use thiserror::Error;

pub use code::{CORE_PREFIX, ErrorCode};
pub use descriptor::{ErrorDescriptor, ErrorParams, Template};
pub use registry::{ErrorRegistry, RegistryBuilder, RegistryError};
pub use taxonomy::{DomainError, PluginError};

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Entity not found")]
    NotFound,

    #[error("Storage failure: {0}")]
    Storage(String),
}
