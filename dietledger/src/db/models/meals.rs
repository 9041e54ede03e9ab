//! Database models for meal log entries.

use crate::types::{MealId, UserId};
use chrono::{DateTime, Utc};

/// Database request for creating a meal entry
#[derive(Debug, Clone)]
pub struct MealCreateDBRequest {
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub on_diet: bool,
    /// Epoch milliseconds
    pub date: i64,
}

/// Database request for replacing a meal entry's mutable fields
#[derive(Debug, Clone)]
pub struct MealUpdateDBRequest {
    pub title: String,
    pub description: String,
    pub on_diet: bool,
    /// Epoch milliseconds
    pub date: i64,
}

/// Database response for a meal entry
#[derive(Debug, Clone)]
pub struct MealDBResponse {
    pub id: MealId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub on_diet: bool,
    pub date: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
