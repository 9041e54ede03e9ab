//! API request/response models for ledger transactions.

use crate::db::models::transactions::TransactionDBResponse;
use crate::types::TransactionId;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Transaction direction. The sign is normalized at creation — credits are
/// stored positive, debits negative — and never re-derived afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Credit,
    Debit,
}

impl TransactionType {
    /// Apply the sign convention to an amount as submitted.
    pub fn signed_amount(self, amount: Decimal) -> Decimal {
        match self {
            TransactionType::Credit => amount,
            TransactionType::Debit => -amount,
        }
    }
}

// Request models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionCreate {
    pub title: String,
    /// Amount as submitted; the `type` determines the stored sign
    #[schema(value_type = f64)]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

// Response models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    /// Transaction ID
    #[schema(value_type = String, format = "uuid")]
    pub id: TransactionId,
    pub title: String,
    /// Signed amount (positive credit, negative debit), serialized as a
    /// string to preserve precision
    #[schema(value_type = String)]
    pub amount: Decimal,
    /// When the transaction was created
    pub created_at: DateTime<Utc>,
}

impl From<TransactionDBResponse> for TransactionResponse {
    fn from(tx: TransactionDBResponse) -> Self {
        Self {
            id: tx.id,
            title: tx.title,
            amount: tx.amount,
            created_at: tx.created_at,
        }
    }
}

/// Net balance over the caller's ledger. Zero for an empty ledger, never null.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionSummary {
    #[schema(value_type = String)]
    pub amount: Decimal,
}

/// Creation response: the stored transaction plus the session cookie when one
/// was minted for this request.
#[derive(Debug)]
pub struct TransactionCreatedResponse {
    pub transaction: TransactionResponse,
    pub cookie: Option<String>,
}

impl IntoResponse for TransactionCreatedResponse {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::CREATED, Json(self.transaction)).into_response();
        if let Some(cookie) = self.cookie {
            if let Ok(value) = header::HeaderValue::from_str(&cookie) {
                response.headers_mut().insert(header::SET_COOKIE, value);
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_keeps_sign() {
        let amount = Decimal::from(500);
        assert_eq!(TransactionType::Credit.signed_amount(amount), Decimal::from(500));
    }

    #[test]
    fn test_debit_negates() {
        let amount = Decimal::from(500);
        assert_eq!(TransactionType::Debit.signed_amount(amount), Decimal::from(-500));
    }

    #[test]
    fn test_type_field_deserializes_from_wire_name() {
        let create: TransactionCreate =
            serde_json::from_str(r#"{"title": "salary", "amount": 500, "type": "credit"}"#).unwrap();
        assert_eq!(create.kind, TransactionType::Credit);
        assert_eq!(create.amount, Decimal::from(500));
    }
}
