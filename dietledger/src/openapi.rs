//! OpenAPI document assembly.

use utoipa::OpenApi;

use crate::api::models::{
    meals::{DietSummary, MealCreate, MealResponse, MealUpdate},
    transactions::{TransactionCreate, TransactionResponse, TransactionSummary, TransactionType},
    users::{UserCreate, UserResponse},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::users::create_user,
        crate::api::handlers::transactions::create_transaction,
        crate::api::handlers::transactions::list_transactions,
        crate::api::handlers::transactions::get_transaction,
        crate::api::handlers::transactions::transaction_summary,
        crate::api::handlers::meals::create_meal,
        crate::api::handlers::meals::list_meals,
        crate::api::handlers::meals::get_meal,
        crate::api::handlers::meals::meal_summary,
        crate::api::handlers::meals::update_meal,
        crate::api::handlers::meals::delete_meal,
    ),
    components(schemas(
        UserCreate,
        UserResponse,
        TransactionCreate,
        TransactionType,
        TransactionResponse,
        TransactionSummary,
        MealCreate,
        MealUpdate,
        MealResponse,
        DietSummary,
    )),
    tags(
        (name = "user", description = "Account registration"),
        (name = "transactions", description = "Session-scoped transaction ledger"),
        (name = "meals", description = "Meal log and diet summary"),
    ),
    info(
        title = "dietledger",
        description = "Cookie-session meal log and personal transaction ledger"
    )
)]
pub struct ApiDoc;
