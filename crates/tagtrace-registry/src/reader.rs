//! Reader registry trait

use crate::error::Result;
use async_trait::async_trait;
use tagtrace_types::{Reader, ReaderId};

/// Registry of known readers
#[async_trait]
pub trait ReaderRegistry: Send + Sync {
    /// Get a reader by id
    async fn get_reader(&self, id: &ReaderId) -> Result<Option<Reader>>;

    /// List all readers
    async fn list_readers(&self) -> Result<Vec<Reader>>;
}
