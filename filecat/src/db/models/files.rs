use crate::catalog::models::File;
use crate::types::FileId;
use chrono::{DateTime, Utc};

/// Database request for creating a new file record
#[derive(Debug, Clone)]
pub struct FileCreateDBRequest {
    pub name: String,
    pub size: i64,
    pub tags: Vec<String>,
}

/// Database request for overwriting a file record. The full record is
/// written; there are no partial updates.
#[derive(Debug, Clone)]
pub struct FileUpdateDBRequest {
    pub name: String,
    pub size: i64,
    pub tags: Vec<String>,
}

/// Database response for a file record
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FileDBResponse {
    pub id: FileId,
    pub name: String,
    pub size: i64,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FileDBResponse> for File {
    fn from(row: FileDBResponse) -> Self {
        Self {
            id: row.id,
            name: row.name,
            size: row.size,
            tags: row.tags,
        }
    }
}
