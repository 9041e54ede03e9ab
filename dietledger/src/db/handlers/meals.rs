//! Database repository for meal log entries.
//!
//! Every key here is `(user_id, id)` — a meal is never addressed by its
//! primary key alone, so one account cannot read or touch another's rows and
//! "absent" is indistinguishable from "not yours".

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::meals::{MealCreateDBRequest, MealDBResponse, MealUpdateDBRequest},
};
use crate::types::{abbrev_uuid, MealId, UserId};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing meals
#[derive(Debug, Clone)]
pub struct MealFilter {
    pub user_id: UserId,
}

impl MealFilter {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub on_diet: bool,
    pub date: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Meal> for MealDBResponse {
    fn from(meal: Meal) -> Self {
        Self {
            id: meal.id,
            user_id: meal.user_id,
            title: meal.title,
            description: meal.description,
            on_diet: meal.on_diet,
            date: meal.date,
            created_at: meal.created_at,
            updated_at: meal.updated_at,
        }
    }
}

pub struct Meals<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Meals<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Meals<'c> {
    type CreateRequest = MealCreateDBRequest;
    type UpdateRequest = MealUpdateDBRequest;
    type Response = MealDBResponse;
    type Id = (UserId, MealId);
    type Filter = MealFilter;

    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&request.user_id)), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            INSERT INTO meals (id, user_id, title, description, on_diet, date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, title, description, on_diet, date, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.user_id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.on_diet)
        .bind(request.date)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(MealDBResponse::from(meal))
    }

    #[instrument(skip(self), fields(meal_id = %abbrev_uuid(&id.1)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let (user_id, meal_id) = id;
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, user_id, title, description, on_diet, date, created_at, updated_at
            FROM meals
            WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(user_id)
        .bind(meal_id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(meal.map(MealDBResponse::from))
    }

    /// Most recent first. Ties on `date` fall back to storage order.
    #[instrument(skip_all, fields(user_id = %abbrev_uuid(&filter.user_id)), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let meals = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, user_id, title, description, on_diet, date, created_at, updated_at
            FROM meals
            WHERE user_id = $1
            ORDER BY date DESC
            "#,
        )
        .bind(filter.user_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(meals.into_iter().map(MealDBResponse::from).collect())
    }

    #[instrument(skip(self, request), fields(meal_id = %abbrev_uuid(&id.1)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Option<Self::Response>> {
        let (user_id, meal_id) = id;
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            UPDATE meals SET
                title = $3,
                description = $4,
                on_diet = $5,
                date = $6,
                updated_at = NOW()
            WHERE user_id = $1 AND id = $2
            RETURNING id, user_id, title, description, on_diet, date, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(meal_id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.on_diet)
        .bind(request.date)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(meal.map(MealDBResponse::from))
    }

    #[instrument(skip(self), fields(meal_id = %abbrev_uuid(&id.1)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let (user_id, meal_id) = id;
        let result = sqlx::query("DELETE FROM meals WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(meal_id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
