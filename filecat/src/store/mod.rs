//! Persistence/search backends for file records.
//!
//! [`FileStore`] is the only thing the catalog service knows about storage. It
//! is held as `Arc<dyn FileStore>` so the process can create the backend once
//! at startup and hand out references.
//!
//! - [`postgres::PostgresFileStore`]: production backend over a `PgPool`
//! - [`in_memory::InMemoryFileStore`]: process-local backend for tests and development

use crate::catalog::models::{File, FileRecord};
use crate::catalog::page::SearchHits;
use crate::catalog::query::FileQuery;
use crate::db::errors::Result;
use async_trait::async_trait;

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryFileStore;
pub use postgres::PostgresFileStore;

/// Trait for file metadata backends
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Insert (no id) or overwrite (with id) a record, returning it as stored
    async fn save(&self, record: FileRecord) -> Result<File>;

    /// Check whether a record with this id exists
    async fn exists(&self, id: &str) -> Result<bool>;

    /// Fetch a record by id
    async fn find_by_id(&self, id: &str) -> Result<Option<File>>;

    /// Remove a record by id. Removing an absent id is a no-op.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Run a search, returning the requested page slice and the total match count
    async fn search(&self, query: &FileQuery) -> Result<SearchHits>;
}
