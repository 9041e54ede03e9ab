//! HTTP handlers for account registration.

use crate::{
    api::models::users::{RegisterResponse, UserCreate, UserResponse},
    auth::{session, SessionCookie},
    db::{errors::DbError, handlers::Users, models::users::UserCreateDBRequest},
    errors::{Error, Result},
    AppState,
};
use axum::{extract::State, Json};

/// Register a new account
///
/// Registration is one of the two session-minting writes: a client-presented
/// cookie token is reused verbatim, otherwise a fresh token is minted and
/// issued via `Set-Cookie`. The email uniqueness check runs first — a
/// duplicate fails the whole request and no token is minted or persisted.
/// The check-then-insert race is accepted; a unique violation that slips
/// through maps to the same response.
#[utoipa::path(
    post,
    path = "/user",
    tag = "user",
    summary = "Register a new account",
    request_body = UserCreate,
    responses(
        (status = 201, description = "Account created, session cookie set if newly minted", body = UserResponse),
        (status = 400, description = "An account with this email already exists"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    SessionCookie(existing): SessionCookie,
    Json(request): Json<UserCreate>,
) -> Result<RegisterResponse> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut users = Users::new(&mut conn);

    if users.get_by_email(&request.email).await?.is_some() {
        return Err(Error::Conflict {
            message: "user already exists".to_string(),
        });
    }

    let session = session::ensure_session(existing);

    let created = users
        .create(&UserCreateDBRequest {
            name: request.name,
            email: request.email,
            session_token: session.token.clone(),
        })
        .await
        .map_err(|err| match err {
            DbError::UniqueViolation { .. } => Error::Conflict {
                message: "user already exists".to_string(),
            },
            other => Error::Database(other),
        })?;

    let cookie = session
        .minted
        .then(|| session::build_session_cookie(&session.token, &state.config));

    Ok(RegisterResponse {
        user: UserResponse::from(created),
        cookie,
    })
}

#[cfg(test)]
mod tests {
    use crate::test::utils::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_register_creates_account_and_sets_cookie(pool: PgPool) {
        let server = create_test_app(pool);

        let response = server
            .post("/user")
            .json(&json!({"name": "Ana", "email": "ana@example.com"}))
            .await;

        response.assert_status(StatusCode::CREATED);
        let cookie = set_cookie_header(&response).expect("registration should set the session cookie");
        assert!(cookie.starts_with("sessionId=ses-"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=604800"));

        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "Ana");
        assert_eq!(body["email"], "ana@example.com");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_register_reuses_presented_cookie_without_reissuing(pool: PgPool) {
        let server = create_test_app(pool);

        // Mint a ledger session first, then register under it
        let token = create_test_transaction(&server, "coffee", 5, "debit").await;

        let response = server
            .post("/user")
            .add_header(session_cookie_header(&token).0, session_cookie_header(&token).1)
            .json(&json!({"name": "Ana", "email": "ana@example.com"}))
            .await;

        response.assert_status(StatusCode::CREATED);
        // Token reused verbatim, so no Set-Cookie on this response
        assert!(set_cookie_header(&response).is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_register_duplicate_email_fails_with_400(pool: PgPool) {
        let server = create_test_app(pool);

        let first = server
            .post("/user")
            .json(&json!({"name": "Ana", "email": "ana@example.com"}))
            .await;
        first.assert_status(StatusCode::CREATED);
        let first_token = session_token_from_response(&first);

        let second = server
            .post("/user")
            .json(&json!({"name": "Other Ana", "email": "ana@example.com"}))
            .await;

        second.assert_status(StatusCode::BAD_REQUEST);
        // No token minted on the failure path
        assert!(set_cookie_header(&second).is_none());
        let body: serde_json::Value = second.json();
        assert_eq!(body["message"], "user already exists");

        // The first account is untouched and still resolves
        let meals = server
            .get("/meals")
            .add_header(session_cookie_header(&first_token).0, session_cookie_header(&first_token).1)
            .await;
        meals.assert_status_ok();
    }
}
