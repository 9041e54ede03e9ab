//! dietledger - a cookie-session meal log and personal transaction ledger.
//!
//! Two independent domains share one session mechanism:
//!
//! - **Transactions**: an anonymous ledger partitioned by the bare session
//!   token. The create endpoint is self-bootstrapping — a request without a
//!   cookie mints a token and issues it; reads require the cookie and trust
//!   it as presented.
//! - **Meals**: a registered-account log (name/email keyed by session token)
//!   with per-account CRUD and a diet streak summary. Every operation
//!   requires the token to resolve to an account; there is no fallback
//!   identity.
//!
//! The application requires a PostgreSQL database and automatically runs
//! migrations on startup:
//!
//! ```no_run
//! use dietledger::{Application, Config};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::default();
//! // Connect, run migrations, build the router
//! let app = Application::new(config).await?;
//! app.serve(std::future::pending()).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod crypto;
pub mod db;
pub mod errors;
pub mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(test)]
pub mod test;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::future::Future;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use config::Config;
pub use types::{MealId, TransactionId, UserId};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the dietledger database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Build the service router around shared state.
pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .route("/user", post(api::handlers::users::create_user))
        .route(
            "/transactions",
            post(api::handlers::transactions::create_transaction).get(api::handlers::transactions::list_transactions),
        )
        .route("/transactions/summary", get(api::handlers::transactions::transaction_summary))
        .route("/transactions/{id}", get(api::handlers::transactions::get_transaction))
        .route(
            "/meals",
            post(api::handlers::meals::create_meal).get(api::handlers::meals::list_meals),
        )
        .route("/meals/summary", get(api::handlers::meals::meal_summary))
        .route(
            "/meals/{id}",
            get(api::handlers::meals::get_meal)
                .put(api::handlers::meals::update_meal)
                .delete(api::handlers::meals::delete_meal),
        )
        .with_state(state)
        .merge(Scalar::with_url("/docs", openapi::ApiDoc::openapi()));

    router.layer(CorsLayer::permissive()).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}

/// The assembled service: connected pool, applied migrations, built router.
///
/// # Application Lifecycle
///
/// 1. **Create**: [`Application::new`] connects to PostgreSQL and runs
///    migrations; [`Application::with_pool`] skips the connect step for an
///    existing pool (tests).
/// 2. **Serve**: [`Application::serve`] binds the configured address and runs
///    until the shutdown future resolves.
pub struct Application {
    state: AppState,
    router: Router,
}

impl Application {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect(&config.database.url)
            .await?;

        Self::with_pool(config, pool).await
    }

    pub async fn with_pool(config: Config, pool: PgPool) -> anyhow::Result<Self> {
        migrator().run(&pool).await?;

        let state = AppState { db: pool, config };
        let router = build_router(state.clone());

        Ok(Self { state, router })
    }

    /// Serve until the shutdown future resolves.
    pub async fn serve(self, shutdown: impl Future<Output = ()> + Send + 'static) -> anyhow::Result<()> {
        let addr = format!("{}:{}", self.state.config.host, self.state.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("Listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router).with_graceful_shutdown(shutdown).await?;

        Ok(())
    }
}
