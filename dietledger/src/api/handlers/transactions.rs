//! HTTP handlers for the session-scoped transaction ledger.

use crate::{
    api::models::transactions::{
        TransactionCreate, TransactionCreatedResponse, TransactionResponse, TransactionSummary,
    },
    auth::{session, LedgerSession, SessionCookie},
    db::{handlers::Transactions, models::transactions::TransactionCreateDBRequest},
    errors::{Error, Result},
    types::TransactionId,
    AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};

/// Create a transaction
///
/// The second session-minting write: reuses a presented cookie token
/// verbatim (no existence check — the token is the ledger's partition key),
/// or mints one and issues it via `Set-Cookie`. The amount is sign-normalized
/// here, at the single write point: credit stays positive, debit is negated.
#[utoipa::path(
    post,
    path = "/transactions",
    tag = "transactions",
    summary = "Create a transaction",
    request_body = TransactionCreate,
    responses(
        (status = 201, description = "Transaction created, session cookie set if newly minted", body = TransactionResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_transaction(
    State(state): State<AppState>,
    SessionCookie(existing): SessionCookie,
    Json(request): Json<TransactionCreate>,
) -> Result<TransactionCreatedResponse> {
    let session = session::ensure_session(existing);

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Transactions::new(&mut conn);

    let transaction = repo
        .create(&TransactionCreateDBRequest {
            title: request.title,
            amount: request.kind.signed_amount(request.amount),
            session_token: session.token.clone(),
        })
        .await?;

    let cookie = session
        .minted
        .then(|| session::build_session_cookie(&session.token, &state.config));

    Ok(TransactionCreatedResponse {
        transaction: TransactionResponse::from(transaction),
        cookie,
    })
}

/// List the caller's transactions
#[utoipa::path(
    get,
    path = "/transactions",
    tag = "transactions",
    summary = "List the session's transactions",
    responses(
        (status = 200, description = "Transactions for the caller's session", body = [TransactionResponse]),
        (status = 401, description = "No session cookie"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_transactions(
    State(state): State<AppState>,
    ledger: LedgerSession,
) -> Result<Json<Vec<TransactionResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Transactions::new(&mut conn);

    let transactions = repo.list_for_session(&ledger.token).await?;

    Ok(Json(transactions.into_iter().map(TransactionResponse::from).collect()))
}

/// Get a single transaction
///
/// A transaction belonging to another session is reported exactly like a
/// missing one: `null`.
#[utoipa::path(
    get,
    path = "/transactions/{id}",
    tag = "transactions",
    summary = "Get a single transaction",
    params(
        ("id" = uuid::Uuid, Path, description = "Transaction ID"),
    ),
    responses(
        (status = 200, description = "The transaction, or null when absent or owned by another session", body = Option<TransactionResponse>),
        (status = 401, description = "No session cookie"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_transaction(
    State(state): State<AppState>,
    ledger: LedgerSession,
    Path(id): Path<TransactionId>,
) -> Result<Json<Option<TransactionResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Transactions::new(&mut conn);

    let transaction = repo.get_for_session(&ledger.token, id).await?;

    Ok(Json(transaction.map(TransactionResponse::from)))
}

/// Net balance of the caller's ledger
#[utoipa::path(
    get,
    path = "/transactions/summary",
    tag = "transactions",
    summary = "Net balance of the session's ledger",
    responses(
        (status = 200, description = "Arithmetic sum of all amounts; 0 for an empty ledger", body = TransactionSummary),
        (status = 401, description = "No session cookie"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn transaction_summary(
    State(state): State<AppState>,
    ledger: LedgerSession,
) -> Result<Json<TransactionSummary>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Transactions::new(&mut conn);

    let amount = repo.sum_for_session(&ledger.token).await?;

    Ok(Json(TransactionSummary { amount }))
}
