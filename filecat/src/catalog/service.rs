//! File service: upload, delete, tag mutation and search over a [`FileStore`].
//!
//! Tag mutations are read-modify-write without any version check. Two callers
//! editing the same record concurrently race, and the last save wins.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::models::{File, FileCandidate, FileRecord};
use super::page::{FilePage, assemble};
use super::query::{PageRequest, build_query};
use super::tags::{self, MissingTags};
use super::validation::validate;
use crate::errors::{Error, Result};
use crate::store::FileStore;
use crate::types::abbrev_id;

#[derive(Clone)]
pub struct FileService {
    store: Arc<dyn FileStore>,
}

impl FileService {
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self { store }
    }

    /// Validate and persist a new record. The category tag implied by the
    /// name's extension is appended to the supplied tags.
    #[instrument(skip(self, candidate), fields(name = ?candidate.name, size = ?candidate.size), err)]
    pub async fn upload(&self, candidate: FileCandidate) -> Result<File> {
        let report = validate(&candidate);
        let (Some(name), Some(size)) = (candidate.name, candidate.size) else {
            return Err(Error::Validation {
                message: report.reason.unwrap_or_default(),
            });
        };
        if let Some(reason) = report.reason {
            return Err(Error::Validation { message: reason });
        }

        let tags = tags::with_inferred_tags(&name, candidate.tags.unwrap_or_default());
        let file = self
            .store
            .save(FileRecord {
                id: None,
                name,
                size,
                tags,
            })
            .await?;

        debug!(id = %abbrev_id(&file.id), "Stored file");
        Ok(file)
    }

    #[instrument(skip(self), err)]
    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.store.exists(id).await? {
            return Err(Error::file_not_found(id));
        }
        self.store.delete(id).await?;
        Ok(())
    }

    /// Set the record's tags to exactly `requested`.
    #[instrument(skip(self), err)]
    pub async fn add_tags(&self, id: &str, requested: &[String]) -> Result<File> {
        let file = self.find(id).await?;
        let updated = file.with_tags(tags::replace_tags(requested));
        Ok(self.store.save(updated.into()).await?)
    }

    /// Remove `requested` from the record's tags. Fails without changing
    /// anything if any requested tag is missing.
    #[instrument(skip(self), err)]
    pub async fn remove_tags(&self, id: &str, requested: &[String]) -> Result<File> {
        let file = self.find(id).await?;
        let remaining = tags::remove_tags(&file.tags, requested).map_err(|MissingTags(missing)| Error::TagMismatch {
            id: id.to_string(),
            missing,
        })?;
        Ok(self.store.save(file.with_tags(remaining).into()).await?)
    }

    #[instrument(skip(self), err)]
    pub async fn search(&self, tags: Option<&[String]>, name: Option<&str>, page: PageRequest) -> Result<FilePage> {
        let query = build_query(tags, name, page);
        let hits = self.store.search(&query).await?;
        Ok(assemble(hits))
    }

    async fn find(&self, id: &str) -> Result<File> {
        self.store.find_by_id(id).await?.ok_or_else(|| Error::file_not_found(id))
    }
}
