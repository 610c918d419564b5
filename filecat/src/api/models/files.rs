use super::pagination::PageParams;
use crate::catalog::models::{File, FileCandidate};
use crate::catalog::page::FilePage;
use crate::types::FileId;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Upload body. Every field is optional at the wire level so that missing
/// values are reported by validation rather than as a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct FileUploadRequest {
    pub name: Option<String>,
    pub size: Option<i64>,
    pub tags: Option<Vec<String>>,
}

impl From<FileUploadRequest> for FileCandidate {
    fn from(request: FileUploadRequest) -> Self {
        Self {
            name: request.name,
            size: request.size,
            tags: request.tags,
        }
    }
}

/// Response for a successful upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    #[serde(rename = "ID")]
    pub id: FileId,
}

/// Outcome of a mutation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }
}

/// A stored file record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileResponse {
    pub id: FileId,
    pub name: String,
    pub size: i64,
    pub tags: Vec<String>,
}

impl From<File> for FileResponse {
    fn from(file: File) -> Self {
        Self {
            id: file.id,
            name: file.name,
            size: file.size,
            tags: file.tags,
        }
    }
}

/// Query parameters for searching files
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SearchFilesQuery {
    /// Required tags (comma-separated); a record must carry all of them
    pub tags: Option<String>,

    /// Name fragment; a record's name must contain it (case-sensitive)
    pub q: Option<String>,

    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: PageParams,
}

impl SearchFilesQuery {
    /// Parse the comma-separated `tags` parameter, trimming whitespace and
    /// dropping empty entries.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// One page of search results
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FilePageResponse {
    /// Matches across all pages
    pub total: i64,
    /// Records on this page
    pub page: Vec<FileResponse>,
}

impl From<FilePage> for FilePageResponse {
    fn from(page: FilePage) -> Self {
        Self {
            total: page.total,
            page: page.files.into_iter().map(FileResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(tags: Option<&str>) -> SearchFilesQuery {
        SearchFilesQuery {
            tags: tags.map(str::to_string),
            q: None,
            pagination: PageParams::default(),
        }
    }

    #[test]
    fn test_tag_list_parsing() {
        assert!(query(None).tag_list().is_empty());
        assert!(query(Some("")).tag_list().is_empty());
        assert_eq!(query(Some("tag1, tag2,,tag3 ")).tag_list(), vec!["tag1", "tag2", "tag3"]);
    }

    #[test]
    fn test_upload_request_tolerates_missing_fields() {
        let request: FileUploadRequest = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert_eq!(request.name.as_deref(), Some(""));
        assert!(request.size.is_none());
        assert!(request.tags.is_none());
    }

    #[test]
    fn test_response_shapes() {
        let upload = serde_json::to_value(UploadResponse { id: "id0".to_string() }).unwrap();
        assert_eq!(upload, serde_json::json!({"ID": "id0"}));

        let status = serde_json::to_value(StatusResponse::ok()).unwrap();
        assert_eq!(status, serde_json::json!({"success": true}));
    }
}
