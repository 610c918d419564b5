//! API request and response data models.
//!
//! These structures define the public HTTP contract and are kept separate from
//! the catalog domain types and the database rows, converting with `From`.
//! All models are annotated with `utoipa` for the generated API docs.
//!
//! - [`files`]: upload, tag and search payloads
//! - [`pagination`]: page/size query parameters

pub mod files;
pub mod pagination;
