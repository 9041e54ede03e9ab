//! Request extractors that resolve the caller's identity.

use crate::{
    api::models::users::CurrentUser,
    auth::session,
    db::handlers::Users,
    errors::Error,
    AppState,
};
use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

/// The raw session cookie, if any. Used by the bootstrap writes
/// (create-transaction, create-user), which mint a token instead of
/// rejecting when none is present.
#[derive(Debug, Clone)]
pub struct SessionCookie(pub Option<String>);

impl FromRequestParts<AppState> for SessionCookie {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(Self(session::token_from_headers(
            &parts.headers,
            &state.config.session.cookie_name,
        )))
    }
}

/// Anonymous ledger identity: the bare session token.
///
/// Presence of a non-empty cookie is the entire check — the token is a
/// partition key the ledger trusts as presented. Protected transaction reads
/// reject with 401 when it is missing.
#[derive(Debug, Clone)]
pub struct LedgerSession {
    pub token: String,
}

impl FromRequestParts<AppState> for LedgerSession {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = session::token_from_headers(&parts.headers, &state.config.session.cookie_name)
            .ok_or(Error::Unauthenticated { message: None })?;
        Ok(Self { token })
    }
}

/// Registered identity resolution: exact token match against the `users`
/// table. No account for the token is a hard stop, never a default identity.
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = session::token_from_headers(&parts.headers, &state.config.session.cookie_name)
            .ok_or(Error::Unauthenticated { message: None })?;

        let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
        let mut users = Users::new(&mut conn);

        let user = users
            .get_by_session_token(&token)
            .await?
            .ok_or(Error::Unauthenticated { message: None })?;

        Ok(CurrentUser {
            id: user.id,
            name: user.name,
            email: user.email,
            session_token: user.session_token,
        })
    }
}
