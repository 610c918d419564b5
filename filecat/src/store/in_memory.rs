//! In-memory file store.
//!
//! Records live in an insertion-ordered vector behind an async `RwLock`. Search
//! evaluates the filter tree directly, so results come back in insertion order.
//! Everything is lost on restart.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;

use super::FileStore;
use crate::catalog::models::{File, FileRecord};
use crate::catalog::page::SearchHits;
use crate::catalog::query::FileQuery;
use crate::db::errors::Result;

#[derive(Clone, Default)]
pub struct InMemoryFileStore {
    files: Arc<RwLock<Vec<File>>>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.files.read().await.is_empty()
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    #[instrument(skip(self, record), fields(name = %record.name), err)]
    async fn save(&self, record: FileRecord) -> Result<File> {
        let mut files = self.files.write().await;
        let file = File {
            id: record.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: record.name,
            size: record.size,
            tags: record.tags,
        };

        match files.iter_mut().find(|f| f.id == file.id) {
            Some(existing) => *existing = file.clone(),
            None => files.push(file.clone()),
        }
        Ok(file)
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.files.read().await.iter().any(|f| f.id == id))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<File>> {
        Ok(self.files.read().await.iter().find(|f| f.id == id).cloned())
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: &str) -> Result<()> {
        self.files.write().await.retain(|f| f.id != id);
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn search(&self, query: &FileQuery) -> Result<SearchHits> {
        let files = self.files.read().await;
        let matching: Vec<&File> = files.iter().filter(|f| query.matches(f)).collect();

        let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(query.page.size).unwrap_or(0);
        let hits = matching.iter().skip(offset).take(size).map(|f| (*f).clone()).collect();

        Ok(SearchHits {
            total: matching.len() as i64,
            hits,
        })
    }
}
