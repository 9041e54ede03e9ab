use base64::{engine::general_purpose, Engine as _};
use rand::{thread_rng, Rng};

/// Generates a cryptographically secure session token with 256 bits of entropy.
///
/// The token is formatted as `ses-{base64url_encoded_random_bytes}` where the
/// random bytes are 32 bytes (256 bits) of cryptographically secure random data.
/// Tokens are opaque: nothing is encoded in them beyond the random payload.
pub fn generate_session_token() -> String {
    let mut token_bytes = [0u8; 32];
    thread_rng().fill(&mut token_bytes[..]);

    format!("ses-{}", general_purpose::URL_SAFE_NO_PAD.encode(token_bytes))
}
