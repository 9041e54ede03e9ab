//! Shared identifier types used across the API and database layers.

use uuid::Uuid;

pub type UserId = Uuid;
pub type MealId = Uuid;
pub type TransactionId = Uuid;

/// Abbreviate a UUID for log fields.
pub fn abbrev_uuid(id: &Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}
