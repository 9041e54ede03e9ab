//! Axum route handlers.

pub mod meals;
pub mod transactions;
pub mod users;
