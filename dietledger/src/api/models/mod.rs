//! API request/response models.
//!
//! Request bodies keep the camelCase field names of the wire contract this
//! service inherited (`onDiet`); response bodies use the storage snake_case
//! names. Conversions from [`crate::db::models`] types live next to each
//! response struct.

pub mod meals;
pub mod transactions;
pub mod users;
