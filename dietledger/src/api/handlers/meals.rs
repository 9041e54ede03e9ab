//! HTTP handlers for the meal log and its diet summary.

use crate::{
    api::models::{
        meals::{parse_date_millis, DietSummary, MealCreate, MealResponse, MealUpdate},
        users::CurrentUser,
    },
    db::{
        handlers::{meals::MealFilter, Meals, Repository},
        models::meals::{MealCreateDBRequest, MealDBResponse, MealUpdateDBRequest},
    },
    errors::{Error, Result},
    types::MealId,
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// Create a meal entry
#[utoipa::path(
    post,
    path = "/meals",
    tag = "meals",
    summary = "Create a meal entry",
    request_body = MealCreate,
    responses(
        (status = 201, description = "Meal created", body = MealResponse),
        (status = 400, description = "Unparseable date"),
        (status = 401, description = "No registered account for the session"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_meal(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<MealCreate>,
) -> Result<(StatusCode, Json<MealResponse>)> {
    let date = parse_date_millis(&request.date).ok_or_else(|| Error::BadRequest {
        message: format!("could not parse date: {}", request.date),
    })?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Meals::new(&mut conn);

    let meal = repo
        .create(&MealCreateDBRequest {
            user_id: current_user.id,
            title: request.title,
            description: request.description,
            on_diet: request.on_diet,
            date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(MealResponse::from(meal))))
}

/// List the account's meals, most recent first
#[utoipa::path(
    get,
    path = "/meals",
    tag = "meals",
    summary = "List the account's meals",
    responses(
        (status = 200, description = "Meals ordered by date descending", body = [MealResponse]),
        (status = 401, description = "No registered account for the session"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_meals(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<Vec<MealResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Meals::new(&mut conn);

    let meals = repo.list(&MealFilter::new(current_user.id)).await?;

    Ok(Json(meals.into_iter().map(MealResponse::from).collect()))
}

/// Get a single meal
///
/// A meal owned by another account is reported exactly like a missing one:
/// `null`, so existence never leaks across accounts.
#[utoipa::path(
    get,
    path = "/meals/{id}",
    tag = "meals",
    summary = "Get a single meal",
    params(
        ("id" = uuid::Uuid, Path, description = "Meal ID"),
    ),
    responses(
        (status = 200, description = "The meal, or null when absent or owned by another account", body = Option<MealResponse>),
        (status = 401, description = "No registered account for the session"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_meal(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<MealId>,
) -> Result<Json<Option<MealResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Meals::new(&mut conn);

    let meal = repo.get_by_id((current_user.id, id)).await?;

    Ok(Json(meal.map(MealResponse::from)))
}

/// Diet summary for the account's meal history
#[utoipa::path(
    get,
    path = "/meals/summary",
    tag = "meals",
    summary = "Diet statistics over the account's meals",
    responses(
        (status = 200, description = "Counts and best on-diet streak", body = DietSummary),
        (status = 401, description = "No registered account for the session"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn meal_summary(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<DietSummary>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Meals::new(&mut conn);

    let meals = repo.list(&MealFilter::new(current_user.id)).await?;

    Ok(Json(diet_summary(&meals)))
}

/// Replace a meal's mutable fields
///
/// Zero matched rows is not an error: the request succeeds without touching
/// anything. Inherited wire behavior, kept on purpose — see the repository's
/// `update` for where the distinction is still visible.
#[utoipa::path(
    put,
    path = "/meals/{id}",
    tag = "meals",
    summary = "Replace a meal's fields",
    params(
        ("id" = uuid::Uuid, Path, description = "Meal ID"),
    ),
    request_body = MealUpdate,
    responses(
        (status = 201, description = "Update applied (or silently skipped when no owned row matched)"),
        (status = 400, description = "Unparseable date"),
        (status = 401, description = "No registered account for the session"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_meal(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<MealId>,
    Json(request): Json<MealUpdate>,
) -> Result<StatusCode> {
    let date = parse_date_millis(&request.date).ok_or_else(|| Error::BadRequest {
        message: format!("could not parse date: {}", request.date),
    })?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Meals::new(&mut conn);

    repo.update(
        (current_user.id, id),
        &MealUpdateDBRequest {
            title: request.title,
            description: request.description,
            on_diet: request.on_diet,
            date,
        },
    )
    .await?;

    Ok(StatusCode::CREATED)
}

/// Delete a meal
#[utoipa::path(
    delete,
    path = "/meals/{id}",
    tag = "meals",
    summary = "Delete a meal",
    params(
        ("id" = uuid::Uuid, Path, description = "Meal ID"),
    ),
    responses(
        (status = 204, description = "Meal deleted"),
        (status = 404, description = "No owned meal with this ID"),
        (status = 401, description = "No registered account for the session"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_meal(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<MealId>,
) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Meals::new(&mut conn);

    let deleted = repo.delete((current_user.id, id)).await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Meal".to_string(),
            id: id.to_string(),
        })
    }
}

/// Single pass over the meals exactly as listed (date descending). The best
/// streak is a run of consecutive on-diet entries in that order, i.e. a
/// most-recent-first run, not a calendar-forward one.
fn diet_summary(meals: &[MealDBResponse]) -> DietSummary {
    let mut total = 0;
    let mut on_diet_count = 0;
    let mut off_diet_count = 0;
    let mut current = 0;
    let mut best_streak = 0;

    for meal in meals {
        total += 1;
        if meal.on_diet {
            on_diet_count += 1;
            current += 1;
        } else {
            off_diet_count += 1;
            current = 0;
        }
        best_streak = best_streak.max(current);
    }

    DietSummary {
        total,
        on_diet_count,
        off_diet_count,
        best_streak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::meals::MealResponse;
    use crate::test::utils::*;
    use axum::http::StatusCode;
    use chrono::Utc;
    use serde_json::json;
    use sqlx::PgPool;
    use uuid::Uuid;

    fn meal(on_diet: bool) -> MealDBResponse {
        MealDBResponse {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "meal".to_string(),
            description: String::new(),
            on_diet,
            date: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_diet_summary_empty_sequence() {
        let summary = diet_summary(&[]);
        assert_eq!(
            summary,
            DietSummary {
                total: 0,
                on_diet_count: 0,
                off_diet_count: 0,
                best_streak: 0
            }
        );
    }

    #[test]
    fn test_diet_summary_single_on_diet_meal() {
        let summary = diet_summary(&[meal(true)]);
        assert_eq!(summary.total, 1);
        assert_eq!(summary.best_streak, 1);
    }

    #[test]
    fn test_diet_summary_all_off_diet() {
        let meals: Vec<_> = (0..4).map(|_| meal(false)).collect();
        let summary = diet_summary(&meals);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.on_diet_count, 0);
        assert_eq!(summary.off_diet_count, 4);
        assert_eq!(summary.best_streak, 0);
    }

    #[test]
    fn test_diet_summary_streak_resets_on_off_diet_meal() {
        // Order matters: [on, off, on, on] yields a best run of 2
        let meals = vec![meal(true), meal(false), meal(true), meal(true)];
        let summary = diet_summary(&meals);
        assert_eq!(
            summary,
            DietSummary {
                total: 4,
                on_diet_count: 3,
                off_diet_count: 1,
                best_streak: 2
            }
        );
    }

    #[test]
    fn test_diet_summary_counts_are_consistent() {
        let meals = vec![meal(true), meal(true), meal(false), meal(true), meal(false)];
        let summary = diet_summary(&meals);
        assert_eq!(summary.on_diet_count + summary.off_diet_count, summary.total);
        assert!(summary.best_streak <= summary.total);
    }

    async fn create_meal_at(server: &axum_test::TestServer, token: &str, date: &str, on_diet: bool) -> MealResponse {
        let response = server
            .post("/meals")
            .add_header(session_cookie_header(token).0, session_cookie_header(token).1)
            .json(&json!({
                "title": "meal",
                "description": "a meal",
                "onDiet": on_diet,
                "date": date,
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_and_fetch_meal_round_trip(pool: PgPool) {
        let server = create_test_app(pool);
        let token = register_test_user(&server, "ana@example.com").await;

        let created = server
            .post("/meals")
            .add_header(session_cookie_header(&token).0, session_cookie_header(&token).1)
            .json(&json!({
                "title": "breakfast",
                "description": "morning oats",
                "onDiet": true,
                "date": "2024-08-15T10:40:00",
            }))
            .await;
        created.assert_status(StatusCode::CREATED);
        let created: MealResponse = created.json();

        let fetched = server
            .get(&format!("/meals/{}", created.id))
            .add_header(session_cookie_header(&token).0, session_cookie_header(&token).1)
            .await;
        fetched.assert_status_ok();
        let fetched: Option<MealResponse> = fetched.json();
        let fetched = fetched.expect("own meal should be visible");

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.title, "breakfast");
        assert_eq!(fetched.description, "morning oats");
        assert!(fetched.on_diet);
        assert_eq!(fetched.date, created.date);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_meal_rejects_unparseable_date(pool: PgPool) {
        let server = create_test_app(pool);
        let token = register_test_user(&server, "ana@example.com").await;

        let response = server
            .post("/meals")
            .add_header(session_cookie_header(&token).0, session_cookie_header(&token).1)
            .json(&json!({
                "title": "breakfast",
                "description": "morning oats",
                "onDiet": true,
                "date": "yesterday-ish",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_meals_orders_by_date_descending(pool: PgPool) {
        let server = create_test_app(pool);
        let token = register_test_user(&server, "ana@example.com").await;

        create_meal_at(&server, &token, "2024-08-10", true).await;
        create_meal_at(&server, &token, "2024-08-20", true).await;
        create_meal_at(&server, &token, "2024-08-15", true).await;

        let response = server
            .get("/meals")
            .add_header(session_cookie_header(&token).0, session_cookie_header(&token).1)
            .await;

        response.assert_status_ok();
        let meals: Vec<MealResponse> = response.json();
        assert_eq!(meals.len(), 3);
        assert!(meals.windows(2).all(|pair| pair[0].date >= pair[1].date));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_meal_routes_require_a_registered_account(pool: PgPool) {
        let server = create_test_app(pool);

        // No cookie at all
        server.get("/meals").await.assert_status(StatusCode::UNAUTHORIZED);
        server.get("/meals/summary").await.assert_status(StatusCode::UNAUTHORIZED);

        // A ledger-only token is not a registered identity
        let ledger_token = create_test_transaction(&server, "salary", 500, "credit").await;
        server
            .get("/meals")
            .add_header(session_cookie_header(&ledger_token).0, session_cookie_header(&ledger_token).1)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_meal_of_other_account_is_null(pool: PgPool) {
        let server = create_test_app(pool);
        let owner = register_test_user(&server, "ana@example.com").await;
        let intruder = register_test_user(&server, "bob@example.com").await;

        let meal = create_meal_at(&server, &owner, "2024-08-15", true).await;

        let response = server
            .get(&format!("/meals/{}", meal.id))
            .add_header(session_cookie_header(&intruder).0, session_cookie_header(&intruder).1)
            .await;

        // Indistinguishable from a meal that does not exist
        response.assert_status_ok();
        let body: Option<MealResponse> = response.json();
        assert!(body.is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_meal_replaces_all_fields(pool: PgPool) {
        let server = create_test_app(pool);
        let token = register_test_user(&server, "ana@example.com").await;

        let meal = create_meal_at(&server, &token, "2024-08-15T10:40:00", true).await;

        let response = server
            .put(&format!("/meals/{}", meal.id))
            .add_header(session_cookie_header(&token).0, session_cookie_header(&token).1)
            .json(&json!({
                "title": "late lunch",
                "description": "moved and renamed",
                "onDiet": false,
                "date": "2024-08-16T14:00:00",
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let fetched = server
            .get(&format!("/meals/{}", meal.id))
            .add_header(session_cookie_header(&token).0, session_cookie_header(&token).1)
            .await;
        let fetched: Option<MealResponse> = fetched.json();
        let fetched = fetched.unwrap();
        assert_eq!(fetched.title, "late lunch");
        assert_eq!(fetched.description, "moved and renamed");
        assert!(!fetched.on_diet);
        assert_ne!(fetched.date, meal.date);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_of_unowned_meal_is_a_silent_no_op(pool: PgPool) {
        let server = create_test_app(pool);
        let owner = register_test_user(&server, "ana@example.com").await;
        let intruder = register_test_user(&server, "bob@example.com").await;

        let meal = create_meal_at(&server, &owner, "2024-08-15", true).await;

        let response = server
            .put(&format!("/meals/{}", meal.id))
            .add_header(session_cookie_header(&intruder).0, session_cookie_header(&intruder).1)
            .json(&json!({
                "title": "hijacked",
                "description": "should not land",
                "onDiet": false,
                "date": "2024-08-16",
            }))
            .await;

        // Succeeds without touching the row
        response.assert_status(StatusCode::CREATED);

        let fetched = server
            .get(&format!("/meals/{}", meal.id))
            .add_header(session_cookie_header(&owner).0, session_cookie_header(&owner).1)
            .await;
        let fetched: Option<MealResponse> = fetched.json();
        assert_eq!(fetched.unwrap().title, "meal");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_meal(pool: PgPool) {
        let server = create_test_app(pool);
        let token = register_test_user(&server, "ana@example.com").await;

        let meal = create_meal_at(&server, &token, "2024-08-15", true).await;

        let response = server
            .delete(&format!("/meals/{}", meal.id))
            .add_header(session_cookie_header(&token).0, session_cookie_header(&token).1)
            .await;
        response.assert_status(StatusCode::NO_CONTENT);

        let fetched = server
            .get(&format!("/meals/{}", meal.id))
            .add_header(session_cookie_header(&token).0, session_cookie_header(&token).1)
            .await;
        let fetched: Option<MealResponse> = fetched.json();
        assert!(fetched.is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_of_unowned_meal_is_not_found(pool: PgPool) {
        let server = create_test_app(pool);
        let owner = register_test_user(&server, "ana@example.com").await;
        let intruder = register_test_user(&server, "bob@example.com").await;

        let meal = create_meal_at(&server, &owner, "2024-08-15", true).await;

        let response = server
            .delete(&format!("/meals/{}", meal.id))
            .add_header(session_cookie_header(&intruder).0, session_cookie_header(&intruder).1)
            .await;

        // Not-owned and absent are the same answer
        response.assert_status(StatusCode::NOT_FOUND);

        let still_there = server
            .get(&format!("/meals/{}", meal.id))
            .add_header(session_cookie_header(&owner).0, session_cookie_header(&owner).1)
            .await;
        let still_there: Option<MealResponse> = still_there.json();
        assert!(still_there.is_some());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_summary_streak_runs_over_listing_order(pool: PgPool) {
        let server = create_test_app(pool);
        let token = register_test_user(&server, "ana@example.com").await;

        // Listed newest-first these read [on, off, on, on]: best streak 2
        create_meal_at(&server, &token, "2024-08-20", true).await;
        create_meal_at(&server, &token, "2024-08-19", false).await;
        create_meal_at(&server, &token, "2024-08-18", true).await;
        create_meal_at(&server, &token, "2024-08-17", true).await;

        let response = server
            .get("/meals/summary")
            .add_header(session_cookie_header(&token).0, session_cookie_header(&token).1)
            .await;

        response.assert_status_ok();
        let summary: DietSummary = response.json();
        assert_eq!(
            summary,
            DietSummary {
                total: 4,
                on_diet_count: 3,
                off_diet_count: 1,
                best_streak: 2
            }
        );
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_summary_of_empty_history_is_all_zeros(pool: PgPool) {
        let server = create_test_app(pool);
        let token = register_test_user(&server, "ana@example.com").await;

        let response = server
            .get("/meals/summary")
            .add_header(session_cookie_header(&token).0, session_cookie_header(&token).1)
            .await;

        response.assert_status_ok();
        let summary: DietSummary = response.json();
        assert_eq!(summary.total, 0);
        assert_eq!(summary.best_streak, 0);
    }
}
