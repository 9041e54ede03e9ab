//! API request/response models for meal log entries.

use crate::db::models::meals::MealDBResponse;
use crate::types::{MealId, UserId};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Request models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealCreate {
    pub title: String,
    pub description: String,
    pub on_diet: bool,
    /// Timestamp or date-only string; see [`parse_date_millis`]
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealUpdate {
    pub title: String,
    pub description: String,
    pub on_diet: bool,
    pub date: String,
}

// Response models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MealResponse {
    /// Meal ID
    #[schema(value_type = String, format = "uuid")]
    pub id: MealId,
    /// Owning account
    #[schema(value_type = String, format = "uuid")]
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub on_diet: bool,
    /// Epoch milliseconds
    pub date: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MealDBResponse> for MealResponse {
    fn from(meal: MealDBResponse) -> Self {
        Self {
            id: meal.id,
            user_id: meal.user_id,
            title: meal.title,
            description: meal.description,
            on_diet: meal.on_diet,
            date: meal.date,
            created_at: meal.created_at,
            updated_at: meal.updated_at,
        }
    }
}

/// Diet statistics over the account's meal history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DietSummary {
    pub total: i64,
    pub on_diet_count: i64,
    pub off_diet_count: i64,
    /// Longest run of consecutive on-diet meals in listing order
    pub best_streak: i64,
}

/// Parse a meal date into epoch milliseconds.
///
/// Accepts RFC 3339 timestamps, naive timestamps (`T`- or space-separated,
/// optional fractional seconds), and bare dates (midnight UTC). Naive inputs
/// are interpreted as UTC.
pub fn parse_date_millis(input: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc).timestamp_millis());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis());
    }
    None
}
