//! # Submission Store
//!
//! The [`SubmissionStore`] trait owns durable append and paginated reads of
//! submissions. Backends:
//!
//! - [`SqliteSubmissionStore`] - `sqlite:<path>` or `sqlite::memory:`
//! - [`MemorySubmissionStore`] - `memory:`
//! - [`FileSubmissionStore`] - `file:<path>` (JSON lines)
//!
//! Listings are newest first by `created_at`, ties broken by newest insertion.

// region: --- Modules
pub mod file_store;
pub mod memory_store;
pub mod sqlite_store;
// endregion: --- Modules

// region: --- Re-exports
pub use file_store::FileSubmissionStore;
pub use memory_store::MemorySubmissionStore;
pub use sqlite_store::SqliteSubmissionStore;
// endregion: --- Re-exports

// region: --- Types and Functions
use crate::model::page::{Page, PageRequest};
use crate::model::submission::{NewSubmission, Submission};
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::cmp::Ordering;
use std::sync::Arc;
use thiserror::Error;

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Persistence fault. Never carries caller input problems.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error("Unsupported store backend: {0}")]
    UnsupportedBackend(String),
}

/// Durable collection of submissions.
///
/// Implementations must make an appended record visible to every read that
/// starts after `append` returns, and each `list_page` must compute its items
/// and totals from one snapshot.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Assign id and timestamps, persist, and return the stored record.
    async fn append(&self, submission: NewSubmission) -> Result<Submission, StoreError>;

    /// Read one page, newest first.
    async fn list_page(&self, request: PageRequest) -> Result<Page<Submission>, StoreError>;
}

/// Open the backend selected by `database_url`.
pub async fn open_store(database_url: &str) -> Result<Arc<dyn SubmissionStore>, StoreError> {
    let url = database_url.trim();

    if url.starts_with("sqlite:") {
        let store = SqliteSubmissionStore::connect(url).await?;
        Ok(Arc::new(store))
    } else if url == "memory:" || url == "memory" {
        Ok(Arc::new(MemorySubmissionStore::new()))
    } else if let Some(path) = url.strip_prefix("file:") {
        let store = FileSubmissionStore::open(path).await?;
        Ok(Arc::new(store))
    } else {
        Err(StoreError::UnsupportedBackend(url.to_string()))
    }
}

/// Listing order for records tagged with their insertion sequence.
pub(crate) fn newest_first(a: &(u64, Submission), b: &(u64, Submission)) -> Ordering {
    b.1.created_at
        .cmp(&a.1.created_at)
        .then_with(|| b.0.cmp(&a.0))
}
// endregion: --- Types and Functions

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_store_selects_backend() {
        let store = open_store("memory:").await.unwrap();
        assert_eq!(store.backend(), "memory");

        let store = open_store("sqlite::memory:").await.unwrap();
        assert_eq!(store.backend(), "sqlite");

        let dir = tempfile::tempdir().unwrap();
        let url = format!("file:{}", dir.path().join("forms.jsonl").display());
        let store = open_store(&url).await.unwrap();
        assert_eq!(store.backend(), "file");
    }

    #[tokio::test]
    async fn test_open_store_rejects_unknown_scheme() {
        let err = open_store("mongodb://localhost/forms").await.err().unwrap();
        assert!(matches!(err, StoreError::UnsupportedBackend(_)));
    }
}
