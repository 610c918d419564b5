//! Search query construction.
//!
//! A search is expressed as a backend-neutral [`FileQuery`]: an optional
//! [`Filter`] tree plus a [`PageRequest`]. Backends either evaluate the tree
//! directly ([`Filter::matches`]) or compile it into their own query language
//! (see `db::handlers::files`).
//!
//! "Contains all tags" is a conjunction of one exact-match predicate per tag,
//! so `tag1` never matches a record tagged only `tag10`.

use super::models::File;

/// Zero-based page index and positive page size. Passed to the backend as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    pub fn new(page: i64, size: i64) -> Self {
        Self { page, size }
    }

    /// Number of records preceding this page.
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

/// Boolean filter over file records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// The tag collection contains this exact tag.
    Tag(String),
    /// The name contains this fragment (case-sensitive).
    NameContains(String),
    /// Every child filter holds. An empty conjunction matches everything.
    All(Vec<Filter>),
}

impl Filter {
    pub fn matches(&self, file: &File) -> bool {
        match self {
            Filter::Tag(tag) => file.tags.iter().any(|t| t == tag),
            Filter::NameContains(fragment) => file.name.contains(fragment.as_str()),
            Filter::All(filters) => filters.iter().all(|f| f.matches(file)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileQuery {
    /// `None` matches every record.
    pub filter: Option<Filter>,
    pub page: PageRequest,
}

impl FileQuery {
    pub fn matches(&self, file: &File) -> bool {
        self.filter.as_ref().is_none_or(|f| f.matches(file))
    }
}

/// Build the query for "records carrying all of `tags` whose name contains `name`".
///
/// Empty or absent tags add no tag condition; an empty or absent name adds no
/// name condition. The page request is carried through unchanged.
pub fn build_query(tags: Option<&[String]>, name: Option<&str>, page: PageRequest) -> FileQuery {
    let tag_filter = match tags {
        Some(tags) if !tags.is_empty() => Some(Filter::All(tags.iter().cloned().map(Filter::Tag).collect())),
        _ => None,
    };
    let name_filter = name.filter(|n| !n.is_empty()).map(|n| Filter::NameContains(n.to_string()));

    let filter = match (tag_filter, name_filter) {
        (Some(tags), Some(name)) => Some(Filter::All(vec![tags, name])),
        (tags, name) => tags.or(name),
    };

    FileQuery { filter, page }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, tags: &[&str]) -> File {
        File {
            id: "id".to_string(),
            name: name.to_string(),
            size: 0,
            tags: tags.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    const PAGE: PageRequest = PageRequest { page: 0, size: 10 };

    #[test]
    fn test_no_tags_no_name_has_no_filter() {
        assert_eq!(build_query(None, None, PAGE).filter, None);
        assert_eq!(build_query(Some(&[][..]), Some(""), PAGE).filter, None);
    }

    #[test]
    fn test_tags_become_conjunction_of_term_filters() {
        let query = build_query(Some(owned(&["tag1", "tag2"]).as_slice()), None, PAGE);
        assert_eq!(
            query.filter,
            Some(Filter::All(vec![Filter::Tag("tag1".into()), Filter::Tag("tag2".into())]))
        );
    }

    #[test]
    fn test_name_only() {
        let query = build_query(None, Some("name1"), PAGE);
        assert_eq!(query.filter, Some(Filter::NameContains("name1".into())));
    }

    #[test]
    fn test_tags_and_name_combined_with_and() {
        let query = build_query(Some(owned(&["yo"]).as_slice()), Some("name"), PAGE);
        assert_eq!(
            query.filter,
            Some(Filter::All(vec![
                Filter::All(vec![Filter::Tag("yo".into())]),
                Filter::NameContains("name".into()),
            ]))
        );
    }

    #[test]
    fn test_page_passed_through() {
        let page = PageRequest::new(3, 7);
        assert_eq!(build_query(None, None, page).page, page);
        assert_eq!(page.offset(), 21);
    }

    #[test]
    fn test_superset_of_tags_required() {
        let query = build_query(Some(owned(&["tag1", "tag2", "tag3"]).as_slice()), None, PAGE);
        assert!(query.matches(&file("name", &["tag3", "tag1", "tag2"])));
        assert!(query.matches(&file("name", &["tag1", "tag2", "tag3", "extra"])));
        assert!(!query.matches(&file("name", &["tag1", "tag2"])));
    }

    #[test]
    fn test_tag_match_is_exact_token() {
        let query = build_query(Some(owned(&["tag1"]).as_slice()), None, PAGE);
        assert!(!query.matches(&file("name", &["tag10"])));
        assert!(!query.matches(&file("name", &["mytag1"])));
    }

    #[test]
    fn test_name_fragment_is_substring() {
        let query = build_query(None, Some("name1"), PAGE);
        assert!(query.matches(&file("yolo.name1.doc", &[])));
        assert!(!query.matches(&file("name0.txt", &[])));
    }

    #[test]
    fn test_empty_conjunction_matches_everything() {
        assert!(Filter::All(vec![]).matches(&file("anything", &[])));
    }
}
