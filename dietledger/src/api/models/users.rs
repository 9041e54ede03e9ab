//! API request/response models for account registration.

use crate::db::models::users::UserDBResponse;
use crate::types::UserId;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The caller's resolved registered identity.
///
/// Produced by the session extractor (token → `users` row) and passed
/// explicitly into every downstream call; it never lives on ambient request
/// state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub session_token: String,
}

// Request models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
}

// Response models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// User ID
    #[schema(value_type = String, format = "uuid")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// When the account was registered
    pub created_at: DateTime<Utc>,
}

impl From<UserDBResponse> for UserResponse {
    fn from(user: UserDBResponse) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Registration response: the created account plus the session cookie when
/// one was minted for this request.
#[derive(Debug)]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub cookie: Option<String>,
}

impl IntoResponse for RegisterResponse {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::CREATED, Json(self.user)).into_response();
        if let Some(cookie) = self.cookie {
            if let Ok(value) = header::HeaderValue::from_str(&cookie) {
                response.headers_mut().insert(header::SET_COOKIE, value);
            }
        }
        response
    }
}
