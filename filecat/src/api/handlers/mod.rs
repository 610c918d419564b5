//! HTTP request handlers.
//!
//! Handlers deserialize the request, call the [`crate::catalog::FileService`]
//! held in [`crate::AppState`], and serialize the result.
//!
//! # Error Handling
//!
//! Handlers return [`crate::errors::Error`], which converts to the HTTP status
//! and the `{"success": false, "error": ...}` body.

pub mod files;
