//! Set operations on a record's tag collection.

use std::path::Path;

/// Returned by [`remove_tags`] when at least one requested tag is not on the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTags(pub Vec<String>);

/// Tag-add semantics: the supplied list becomes the whole collection.
pub fn replace_tags(requested: &[String]) -> Vec<String> {
    requested.to_vec()
}

/// Remove every requested tag, keeping the relative order of what remains.
///
/// All-or-nothing: if any requested tag is absent from `current`, nothing is
/// removed and the absent tags are reported.
pub fn remove_tags(current: &[String], requested: &[String]) -> Result<Vec<String>, MissingTags> {
    let missing: Vec<String> = requested.iter().filter(|tag| !current.contains(tag)).cloned().collect();
    if !missing.is_empty() {
        return Err(MissingTags(missing));
    }
    Ok(current.iter().filter(|tag| !requested.contains(tag)).cloned().collect())
}

const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "document",
        &["txt", "doc", "docx", "pdf", "odt", "rtf", "md", "xls", "xlsx", "ppt", "pptx", "csv"],
    ),
    ("image", &["jpg", "jpeg", "png", "gif", "bmp", "svg", "webp", "tiff"]),
    ("audio", &["mp3", "wav", "flac", "ogg", "aac", "m4a"]),
    ("video", &["mp4", "avi", "mkv", "mov", "webm", "wmv"]),
];

/// Category tag implied by a file name's extension, if the extension is known.
pub fn category_for(name: &str) -> Option<&'static str> {
    let extension = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    CATEGORIES
        .iter()
        .find(|(_, extensions)| extensions.contains(&extension.as_str()))
        .map(|(category, _)| *category)
}

/// Append the category tag for `name` unless it is already present.
pub fn with_inferred_tags(name: &str, mut tags: Vec<String>) -> Vec<String> {
    if let Some(category) = category_for(name)
        && !tags.iter().any(|tag| tag == category)
    {
        tags.push(category.to_string());
    }
    tags
}
