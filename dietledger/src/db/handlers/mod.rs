//! Repository implementations for database access.
//!
//! Each repository wraps a SQLx connection, provides strongly-typed
//! operations for one table, and returns domain models from
//! [`crate::db::models`]. Where the full CRUD shape exists ([`Meals`]) the
//! repository implements the [`Repository`] trait; the narrower surfaces
//! ([`Users`], [`Transactions`]) expose only the operations they need.
//!
//! # Common Pattern
//!
//! ```ignore
//! use dietledger::db::handlers::{Meals, Repository};
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut conn = pool.acquire().await?;
//!     let mut repo = Meals::new(&mut conn);
//!     let meals = repo.list(&filter).await?;
//!     Ok(())
//! }
//! ```

pub mod meals;
pub mod repository;
pub mod transactions;
pub mod users;

pub use meals::Meals;
pub use repository::Repository;
pub use transactions::Transactions;
pub use users::Users;
