//! Shapes raw backend results into the page handed back to callers.

use super::models::File;

/// What a backend returns for a search: the records of the requested slice, in
/// backend order, plus the number of matches across all pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHits {
    pub total: i64,
    pub hits: Vec<File>,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePage {
    /// Matches across all pages; may exceed `files.len()`.
    pub total: i64,
    pub files: Vec<File>,
}

/// Pure reshape: no sorting, filtering or deduplication. The backend has
/// already applied the page request, so the slice is taken as-is.
pub fn assemble(hits: SearchHits) -> FilePage {
    FilePage {
        total: hits.total,
        files: hits.hits,
    }
}
