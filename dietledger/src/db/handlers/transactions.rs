//! Database repository for the session-scoped transaction ledger.
//!
//! Every operation filters on `session_token` equality. The token is the
//! whole identity here: there is no user table behind it and no existence
//! check against one.

use crate::db::{
    errors::Result,
    models::transactions::{TransactionCreateDBRequest, TransactionDBResponse},
};
use crate::types::{abbrev_uuid, TransactionId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection};
use tracing::instrument;
use uuid::Uuid;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Transaction {
    pub id: Uuid,
    pub title: String,
    pub amount: Decimal,
    pub session_token: String,
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionDBResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            title: tx.title,
            amount: tx.amount,
            session_token: tx.session_token,
            created_at: tx.created_at,
        }
    }
}

pub struct Transactions<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Transactions<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(title = %request.title), err)]
    pub async fn create(&mut self, request: &TransactionCreateDBRequest) -> Result<TransactionDBResponse> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (id, title, amount, session_token)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, amount, session_token, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.title)
        .bind(request.amount)
        .bind(&request.session_token)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(TransactionDBResponse::from(transaction))
    }

    #[instrument(skip_all, err)]
    pub async fn list_for_session(&mut self, session_token: &str) -> Result<Vec<TransactionDBResponse>> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, title, amount, session_token, created_at
            FROM transactions
            WHERE session_token = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(session_token)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(transactions.into_iter().map(TransactionDBResponse::from).collect())
    }

    #[instrument(skip(self, session_token), fields(transaction_id = %abbrev_uuid(&id)), err)]
    pub async fn get_for_session(&mut self, session_token: &str, id: TransactionId) -> Result<Option<TransactionDBResponse>> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, title, amount, session_token, created_at
            FROM transactions
            WHERE session_token = $1 AND id = $2
            "#,
        )
        .bind(session_token)
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(transaction.map(TransactionDBResponse::from))
    }

    /// Net balance for a token's ledger. An empty ledger sums to zero, never
    /// null: amounts are sign-normalized at insert so a plain SUM is the
    /// balance.
    #[instrument(skip_all, err)]
    pub async fn sum_for_session(&mut self, session_token: &str) -> Result<Decimal> {
        let amount: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0) FROM transactions WHERE session_token = $1",
        )
        .bind(session_token)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(amount)
    }
}
