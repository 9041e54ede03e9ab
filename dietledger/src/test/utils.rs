//! Test utilities for integration testing

use crate::{build_router, AppState, Config};
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum_test::{TestResponse, TestServer};
use serde_json::json;
use sqlx::PgPool;

pub fn create_test_config() -> Config {
    Config::default()
}

pub fn create_test_app(pool: PgPool) -> TestServer {
    let state = AppState {
        db: pool,
        config: create_test_config(),
    };
    TestServer::new(build_router(state)).expect("Failed to create test server")
}

/// The raw Set-Cookie header of a response, if any.
pub fn set_cookie_header(response: &TestResponse) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .map(|value| value.to_str().expect("Set-Cookie should be ASCII").to_string())
}

/// Extract the session token from a minting response's Set-Cookie header.
pub fn session_token_from_response(response: &TestResponse) -> String {
    let set_cookie = set_cookie_header(response).expect("response should set the session cookie");
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.split_once('='))
        .map(|(_, token)| token.to_string())
        .expect("Set-Cookie should carry name=token")
}

/// Cookie header pair presenting a session token.
pub fn session_cookie_header(token: &str) -> (HeaderName, HeaderValue) {
    (
        header::COOKIE,
        HeaderValue::from_str(&format!("sessionId={token}")).expect("token should be a valid header value"),
    )
}

/// Register an account and return its minted session token.
pub async fn register_test_user(server: &TestServer, email: &str) -> String {
    let response = server
        .post("/user")
        .json(&json!({"name": "Test User", "email": email}))
        .await;
    response.assert_status(StatusCode::CREATED);
    session_token_from_response(&response)
}

/// Create a ledger transaction without presenting a cookie and return the
/// minted session token.
pub async fn create_test_transaction(server: &TestServer, title: &str, amount: i64, kind: &str) -> String {
    let response = server
        .post("/transactions")
        .json(&json!({"title": title, "amount": amount, "type": kind}))
        .await;
    response.assert_status(StatusCode::CREATED);
    session_token_from_response(&response)
}
