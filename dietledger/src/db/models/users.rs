//! Database models for registered accounts.

use crate::types::UserId;
use chrono::{DateTime, Utc};

/// Database request for creating a registered account
#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub name: String,
    pub email: String,
    /// The session token that becomes the account's durable identity.
    /// Immutable once issued.
    pub session_token: String,
}

/// Database response for a registered account
#[derive(Debug, Clone)]
pub struct UserDBResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub session_token: String,
    pub created_at: DateTime<Utc>,
}
