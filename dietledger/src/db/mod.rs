//! Database access layer.
//!
//! Organized into:
//!
//! - **[`errors`]**: [`errors::DbError`] classification of `sqlx` failures
//! - **[`handlers`]**: repository structs wrapping a `PgConnection` per table
//! - **[`models`]**: request/response types crossing the repository boundary

pub mod errors;
pub mod handlers;
pub mod models;
