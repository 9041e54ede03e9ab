//! Database models for ledger transactions.

use crate::types::TransactionId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Database request for creating a ledger transaction.
///
/// `amount` is already sign-normalized by the API layer: credits are positive,
/// debits negative. The repository never re-interprets the sign.
#[derive(Debug, Clone)]
pub struct TransactionCreateDBRequest {
    pub title: String,
    pub amount: Decimal,
    pub session_token: String,
}

/// Database response for a ledger transaction
#[derive(Debug, Clone)]
pub struct TransactionDBResponse {
    pub id: TransactionId,
    pub title: String,
    pub amount: Decimal,
    pub session_token: String,
    pub created_at: DateTime<Utc>,
}
