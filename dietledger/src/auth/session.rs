//! Session cookie mechanics: bootstrap-or-reuse, parsing, and issuance.

use crate::{config::Config, crypto};
use axum::http::{header, HeaderMap};

/// Outcome of the bootstrap-or-reuse step on a session-minting write.
///
/// `minted` drives cookie issuance: the `Set-Cookie` header goes out only on
/// the response that created the token, never on reuse.
#[derive(Debug, Clone)]
pub struct EnsuredSession {
    pub token: String,
    pub minted: bool,
}

/// Reuse a client-presented token verbatim, or mint a fresh one.
///
/// A present, non-empty token is taken as-is with no existence check against
/// storage — on the ledger path the token is a trusted partition key, not a
/// security boundary.
pub fn ensure_session(existing: Option<String>) -> EnsuredSession {
    match existing {
        Some(token) if !token.is_empty() => EnsuredSession { token, minted: false },
        _ => EnsuredSession {
            token: crypto::generate_session_token(),
            minted: true,
        },
    }
}

/// Extract the session token from the Cookie header, if any.
///
/// Empty values count as absent so that `sessionId=` cannot name a partition.
pub fn token_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?;
    let cookie_str = cookie_header.to_str().ok()?;

    for cookie in cookie_str.split(';') {
        let cookie = cookie.trim();
        if let Some((name, value)) = cookie.split_once('=') {
            if name == cookie_name && !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Helper function to create a session cookie
pub fn build_session_cookie(token: &str, config: &Config) -> String {
    let session = &config.session;
    let max_age = session.lifetime.as_secs();

    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite={}; Max-Age={}",
        session.cookie_name, token, session.cookie_same_site, max_age
    );
    if session.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_ensure_session_reuses_existing_token() {
        let session = ensure_session(Some("ses-abc".to_string()));
        assert_eq!(session.token, "ses-abc");
        assert!(!session.minted);
    }

    #[test]
    fn test_ensure_session_mints_when_absent() {
        let session = ensure_session(None);
        assert!(session.minted);
        assert!(session.token.starts_with("ses-"));
    }

    #[test]
    fn test_ensure_session_mints_when_empty() {
        let session = ensure_session(Some(String::new()));
        assert!(session.minted);
        assert!(!session.token.is_empty());
    }

    #[test]
    fn test_token_from_headers_finds_named_cookie() {
        let headers = headers_with_cookie("theme=dark; sessionId=ses-xyz; lang=en");
        assert_eq!(token_from_headers(&headers, "sessionId"), Some("ses-xyz".to_string()));
    }

    #[test]
    fn test_token_from_headers_missing_cookie() {
        let headers = headers_with_cookie("theme=dark");
        assert_eq!(token_from_headers(&headers, "sessionId"), None);
    }

    #[test]
    fn test_token_from_headers_empty_value_is_absent() {
        let headers = headers_with_cookie("sessionId=");
        assert_eq!(token_from_headers(&headers, "sessionId"), None);
    }

    #[test]
    fn test_token_from_headers_no_header() {
        let headers = HeaderMap::new();
        assert_eq!(token_from_headers(&headers, "sessionId"), None);
    }

    #[test]
    fn test_build_session_cookie_attributes() {
        let config = Config::default();
        let cookie = build_session_cookie("ses-abc", &config);

        assert!(cookie.starts_with("sessionId=ses-abc"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("HttpOnly"));
        // 7 days
        assert!(cookie.contains("Max-Age=604800"));
    }

    #[test]
    fn test_build_session_cookie_secure_flag() {
        let mut config = Config::default();
        config.session.cookie_secure = true;
        let cookie = build_session_cookie("ses-abc", &config);
        assert!(cookie.ends_with("; Secure"));
    }
}
