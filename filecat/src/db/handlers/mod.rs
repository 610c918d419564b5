//! Repository implementations for database access.
//!
//! Repositories follow a consistent pattern and implement the [`Repository`] trait.
//!
//! # Design Pattern
//!
//! Each repository:
//! - Wraps a borrowed SQLx connection (pooled connection or transaction)
//! - Provides strongly-typed CRUD operations
//! - Handles query construction and parameter binding
//! - Returns row models from [`crate::db::models`]
//!
//! # Available Repositories
//!
//! - [`Files`]: File metadata records, including tag/name search
//!
//! # Common Pattern
//!
//! ```ignore
//! use filecat::db::handlers::{Files, Repository};
//!
//! async fn example(pool: &sqlx::PgPool, id: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut conn = pool.acquire().await?;
//!     let mut repo = Files::new(&mut conn);
//!
//!     if let Some(file) = repo.get_by_id(id).await? {
//!         println!("{} ({} bytes)", file.name, file.size);
//!     }
//!     Ok(())
//! }
//! ```

pub mod files;
pub mod repository;

pub use files::Files;
pub use repository::Repository;
