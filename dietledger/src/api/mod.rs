//! API layer for HTTP request handling and data models.
//!
//! This module contains the REST API implementation, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! - **Registration** (`/user`): account creation, mints the session cookie
//! - **Transactions** (`/transactions/*`): anonymous per-token ledger with a
//!   net-balance summary
//! - **Meals** (`/meals/*`): registered-account meal log with a diet streak
//!   summary
//!
//! All endpoints are documented with OpenAPI annotations using `utoipa`;
//! the rendered documentation is served at `/docs`.

pub mod handlers;
pub mod models;
