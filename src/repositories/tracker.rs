//! Tracker repository - date-keyed logs of consumed recipes and ingredients
//!
//! Totals are derived, not stored: `get_totals` loads the tracker's
//! directly-logged ingredient collection and sums it in memory. Recipes
//! logged on a tracker are kept as references only and do not feed the
//! totals.

use crate::error::{StoreError, StoreResult};
use crate::repositories::{IngredientRecord, RecipeRecord};
use crate::totals::{sum_nutrients, NutrientTotals};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

/// Tracker record from the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TrackerRecord {
    pub id: Uuid,
    pub day: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Tracker repository
pub struct TrackerRepository;

impl TrackerRepository {
    /// Create a new tracker for a day
    pub async fn create(pool: &PgPool, day: NaiveDate) -> StoreResult<TrackerRecord> {
        let tracker = sqlx::query_as::<_, TrackerRecord>(
            r#"
            INSERT INTO trackers (day)
            VALUES ($1)
            RETURNING id, day, created_at
            "#,
        )
        .bind(day)
        .fetch_one(pool)
        .await?;

        debug!(tracker_id = %tracker.id, day = %tracker.day, "Tracker created");
        Ok(tracker)
    }

    /// Find tracker by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> StoreResult<Option<TrackerRecord>> {
        let tracker = sqlx::query_as::<_, TrackerRecord>(
            r#"
            SELECT id, day, created_at
            FROM trackers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(tracker)
    }

    /// Find the most recent tracker for a day
    pub async fn find_by_day(pool: &PgPool, day: NaiveDate) -> StoreResult<Option<TrackerRecord>> {
        let tracker = sqlx::query_as::<_, TrackerRecord>(
            r#"
            SELECT id, day, created_at
            FROM trackers
            WHERE day = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(day)
        .fetch_optional(pool)
        .await?;

        Ok(tracker)
    }

    /// List all trackers, most recent day first
    pub async fn list(pool: &PgPool) -> StoreResult<Vec<TrackerRecord>> {
        let trackers = sqlx::query_as::<_, TrackerRecord>(
            r#"
            SELECT id, day, created_at
            FROM trackers
            ORDER BY day DESC, created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(trackers)
    }

    /// Log a recipe on a tracker (idempotent)
    pub async fn log_recipe(pool: &PgPool, tracker_id: Uuid, recipe_id: Uuid) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tracker_recipes (tracker_id, recipe_id)
            VALUES ($1, $2)
            ON CONFLICT (tracker_id, recipe_id) DO NOTHING
            "#,
        )
        .bind(tracker_id)
        .bind(recipe_id)
        .execute(pool)
        .await
        .map_err(|e| StoreError::from_db(e, "tracker recipe"))?;

        Ok(())
    }

    /// Remove a recipe from a tracker
    pub async fn unlog_recipe(pool: &PgPool, tracker_id: Uuid, recipe_id: Uuid) -> StoreResult<bool> {
        let result =
            sqlx::query("DELETE FROM tracker_recipes WHERE tracker_id = $1 AND recipe_id = $2")
                .bind(tracker_id)
                .bind(recipe_id)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Log an ingredient on a tracker (idempotent)
    pub async fn log_ingredient(
        pool: &PgPool,
        tracker_id: Uuid,
        ingredient_id: Uuid,
    ) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tracker_ingredients (tracker_id, ingredient_id)
            VALUES ($1, $2)
            ON CONFLICT (tracker_id, ingredient_id) DO NOTHING
            "#,
        )
        .bind(tracker_id)
        .bind(ingredient_id)
        .execute(pool)
        .await
        .map_err(|e| StoreError::from_db(e, "tracker ingredient"))?;

        Ok(())
    }

    /// Remove an ingredient from a tracker
    pub async fn unlog_ingredient(
        pool: &PgPool,
        tracker_id: Uuid,
        ingredient_id: Uuid,
    ) -> StoreResult<bool> {
        let result = sqlx::query(
            "DELETE FROM tracker_ingredients WHERE tracker_id = $1 AND ingredient_id = $2",
        )
        .bind(tracker_id)
        .bind(ingredient_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get the recipes logged on a tracker, ordered by name
    pub async fn recipes(pool: &PgPool, tracker_id: Uuid) -> StoreResult<Vec<RecipeRecord>> {
        let recipes = sqlx::query_as::<_, RecipeRecord>(
            r#"
            SELECT r.id, r.name, r.created_at
            FROM recipes r
            JOIN tracker_recipes tr ON tr.recipe_id = r.id
            WHERE tr.tracker_id = $1
            ORDER BY r.name ASC
            "#,
        )
        .bind(tracker_id)
        .fetch_all(pool)
        .await?;

        Ok(recipes)
    }

    /// Get the ingredients logged directly on a tracker, ordered by name
    pub async fn ingredients(pool: &PgPool, tracker_id: Uuid) -> StoreResult<Vec<IngredientRecord>> {
        let ingredients = sqlx::query_as::<_, IngredientRecord>(
            r#"
            SELECT i.id, i.name, i.calories, i.protein, i.carbs, i.fat, i.fiber,
                   i.serving_size, i.unit, i.created_at
            FROM ingredients i
            JOIN tracker_ingredients ti ON ti.ingredient_id = i.id
            WHERE ti.tracker_id = $1
            ORDER BY i.name ASC
            "#,
        )
        .bind(tracker_id)
        .fetch_all(pool)
        .await?;

        Ok(ingredients)
    }

    /// Derive nutrient totals for a tracker
    ///
    /// Each logged ingredient contributes its full per-serving values
    /// exactly once; an empty log yields all-zero totals. Errors with
    /// [`StoreError::NotFound`] if the tracker does not exist.
    pub async fn get_totals(pool: &PgPool, tracker_id: Uuid) -> StoreResult<NutrientTotals> {
        Self::find_by_id(pool, tracker_id)
            .await?
            .ok_or_else(|| StoreError::NotFound("Tracker not found".to_string()))?;

        let ingredients = Self::ingredients(pool, tracker_id).await?;
        Ok(sum_nutrients(&ingredients))
    }

    /// Delete a tracker
    ///
    /// Association rows are removed by the cascade; recipes and
    /// ingredients survive.
    pub async fn delete(pool: &PgPool, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM trackers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
