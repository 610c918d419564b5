//! Domain objects shared by the catalog components and the storage backends.

use crate::types::FileId;
use serde::{Deserialize, Serialize};

/// A persisted file record. The identifier is always present once the backend
/// has saved the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub id: FileId,
    pub name: String,
    pub size: i64,
    pub tags: Vec<String>,
}

impl File {
    /// Copy of this record with its tag collection replaced wholesale.
    pub fn with_tags(self, tags: Vec<String>) -> Self {
        Self { tags, ..self }
    }
}

/// Record handed to [`crate::store::FileStore::save`]. Without an id the backend
/// inserts and assigns one; with an id the stored record is overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub id: Option<FileId>,
    pub name: String,
    pub size: i64,
    pub tags: Vec<String>,
}

impl From<File> for FileRecord {
    fn from(file: File) -> Self {
        Self {
            id: Some(file.id),
            name: file.name,
            size: file.size,
            tags: file.tags,
        }
    }
}

/// An upload as received from a caller, before validation. Any field may be
/// missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: Option<String>,
    pub size: Option<i64>,
    pub tags: Option<Vec<String>>,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, size: i64) -> Self {
        Self {
            name: Some(name.into()),
            size: Some(size),
            tags: None,
        }
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}
