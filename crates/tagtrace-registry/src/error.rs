//! Registry error types

use tagtrace_types::{DeviceId, ReaderId, TagId};
use thiserror::Error;

/// Registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Device not found: {0}")]
    DeviceNotFound(DeviceId),

    #[error("Reader not found: {0}")]
    ReaderNotFound(ReaderId),

    #[error("Tag already registered: {0}")]
    DuplicateTag(TagId),

    #[error("Device already exists: {0}")]
    DeviceAlreadyExists(DeviceId),

    #[error("Reader already exists: {0}")]
    ReaderAlreadyExists(ReaderId),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
