//! Session identity resolution.
//!
//! Two disjoint identity types share one cookie (`sessionId` by default):
//!
//! - [`identity::LedgerSession`] — the anonymous ledger identity. The bare
//!   token is the whole identity: extraction requires a present, non-empty
//!   cookie and performs no storage lookup.
//! - [`crate::api::models::users::CurrentUser`] — the registered identity.
//!   Extraction resolves the token against the `users` table and rejects with
//!   401 before any downstream storage access when no account matches.
//!
//! Keeping the two types distinct means a ledger-only token can never be
//! promoted into meal access, and vice versa.
//!
//! [`session`] holds the cookie mechanics: the reuse-or-mint bootstrap,
//! header parsing, and `Set-Cookie` assembly.

pub mod identity;
pub mod session;

pub use identity::{LedgerSession, SessionCookie};
