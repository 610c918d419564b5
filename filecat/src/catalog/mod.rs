//! The file catalog core.
//!
//! Everything here is backend-agnostic: the service talks to storage only
//! through [`crate::store::FileStore`].
//!
//! - [`validation`]: structural checks on upload candidates
//! - [`tags`]: tag replacement, all-or-nothing removal, category inference
//! - [`query`]: search descriptors (tag conjunction plus name fragment)
//! - [`page`]: reshaping backend hits into a page result
//! - [`service`]: [`FileService`], which composes the above

pub mod models;
pub mod page;
pub mod query;
pub mod service;
pub mod tags;
pub mod validation;

pub use models::{File, FileCandidate, FileRecord};
pub use service::FileService;
