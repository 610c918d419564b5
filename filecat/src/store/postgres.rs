//! PostgreSQL file store.
//!
//! Thin adapter from [`FileStore`] onto the [`Files`] repository. Each call
//! checks a connection out of the pool for its duration.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use super::FileStore;
use crate::catalog::models::{File, FileRecord};
use crate::catalog::page::SearchHits;
use crate::catalog::query::FileQuery;
use crate::db::errors::{DbError, Result};
use crate::db::handlers::{Files, Repository};
use crate::db::models::files::{FileCreateDBRequest, FileUpdateDBRequest};

#[derive(Clone)]
pub struct PostgresFileStore {
    pool: PgPool,
}

impl PostgresFileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Open a transaction in which every statement reads the same snapshot, so a
/// count and the page slice that follows it agree with each other.
async fn begin_snapshot(pool: &PgPool) -> Result<Transaction<'static, Postgres>> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}

#[async_trait]
impl FileStore for PostgresFileStore {
    #[instrument(skip(self, record), fields(name = %record.name, id = ?record.id), err)]
    async fn save(&self, record: FileRecord) -> Result<File> {
        let mut conn = self.pool.acquire().await.map_err(DbError::from)?;
        let mut repo = Files::new(&mut conn);

        let row = match record.id {
            None => {
                repo.create(&FileCreateDBRequest {
                    name: record.name,
                    size: record.size,
                    tags: record.tags,
                })
                .await?
            }
            Some(id) => {
                repo.update(
                    &id,
                    &FileUpdateDBRequest {
                        name: record.name,
                        size: record.size,
                        tags: record.tags,
                    },
                )
                .await?
            }
        };

        Ok(row.into())
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        let mut conn = self.pool.acquire().await.map_err(DbError::from)?;
        Files::new(&mut conn).exists(id).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<File>> {
        let mut conn = self.pool.acquire().await.map_err(DbError::from)?;
        let row = Files::new(&mut conn).get_by_id(id).await?;
        Ok(row.map(File::from))
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: &str) -> Result<()> {
        let mut conn = self.pool.acquire().await.map_err(DbError::from)?;
        Files::new(&mut conn).delete(id).await?;
        Ok(())
    }

    #[instrument(skip(self, query), fields(page = query.page.page, size = query.page.size), err)]
    async fn search(&self, query: &FileQuery) -> Result<SearchHits> {
        let mut tx = begin_snapshot(&self.pool).await?;
        let (total, rows) = {
            let mut repo = Files::new(&mut tx);
            let total = repo.count(query).await?;
            let rows = repo.list(query).await?;
            (total, rows)
        };
        tx.commit().await.map_err(DbError::from)?;

        Ok(SearchHits {
            total,
            hits: rows.into_iter().map(File::from).collect(),
        })
    }
}
