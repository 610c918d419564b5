//! Database record models matching table schemas.
//!
//! These structs correspond directly to table rows. Repositories return them
//! from queries and accept them for inserts and updates.
//!
//! - **Schema Mapping**: Each model struct matches a database table schema
//! - **SQLx Integration**: Response models derive `sqlx::FromRow`
//! - **Separation**: Database models are distinct from the catalog domain
//!   objects and API models, and convert into them with `From`
//!
//! # Models
//!
//! - [`files`]: File metadata records (name, size, tags)

pub mod files;
