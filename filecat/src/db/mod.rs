//! Database layer for data persistence and access.
//!
//! This module implements the Postgres side of the catalog using SQLx. It follows
//! the Repository pattern used throughout the crate.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ FileService  │  (catalog::service - orchestration)
//! └──────┬───────┘
//!        │
//!        ↓
//! ┌──────────────┐
//! │  FileStore   │  (store::postgres - backend interface)
//! └──────┬───────┘
//!        │
//!        ↓
//! ┌──────────────┐
//! │ Repositories │  (db::handlers - queries)
//! └──────┬───────┘
//!        │
//!        ↓
//! ┌──────────────┐
//! │  PostgreSQL  │
//! └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations for CRUD and search
//! - [`models`]: Database record structures matching table schemas
//! - [`errors`]: Database-specific error types
//! - [`embedded`]: Embedded PostgreSQL database support (optional feature)
//!
//! # Migrations
//!
//! Database migrations are managed by SQLx and located in the `migrations/` directory.
//! The [`crate::migrator`] function provides access to the migrator:
//!
//! ```ignore
//! filecat::migrator().run(&pool).await?;
//! ```

pub mod embedded;
pub mod errors;
pub mod handlers;
pub mod models;
