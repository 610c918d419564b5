//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers
//! - **[`extractors`]**: Body extractors reporting failures in the API's error shape
//! - **[`models`]**: Request/response data structures
//!
//! # API Structure
//!
//! - `POST /file`: upload file metadata
//! - `DELETE /file/{id}`: delete a record
//! - `POST /file/{id}/tags`, `DELETE /file/{id}/tags`: replace or remove tags
//! - `GET /file`: search by tags and name fragment
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with `utoipa`. The interactive docs are served
//! at `/docs` when the server is running.

pub mod extractors;
pub mod handlers;
pub mod models;
