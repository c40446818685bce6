//! Recipe repository - database operations for named ingredient collections
//!
//! A recipe is constructed with a name and a non-empty ingredient
//! collection; the repository preserves that contract on removal as well.

use crate::error::{StoreError, StoreResult};
use crate::repositories::IngredientRecord;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

/// Recipe record from the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecipeRecord {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Recipe repository
pub struct RecipeRepository;

impl RecipeRepository {
    /// Create a new recipe with its initial ingredient collection
    ///
    /// The collection must be non-empty. The recipe row and its
    /// association rows are inserted in one transaction; a duplicate name
    /// surfaces as [`StoreError::Conflict`] and an unknown ingredient id
    /// as [`StoreError::NotFound`].
    pub async fn create(
        pool: &PgPool,
        name: &str,
        ingredient_ids: &[Uuid],
    ) -> StoreResult<RecipeRecord> {
        if name.trim().is_empty() {
            return Err(StoreError::Validation("Recipe name cannot be empty".to_string()));
        }
        if ingredient_ids.is_empty() {
            return Err(StoreError::Validation(
                "Recipe requires at least one ingredient".to_string(),
            ));
        }

        let mut tx = pool.begin().await?;

        let recipe = sqlx::query_as::<_, RecipeRecord>(
            r#"
            INSERT INTO recipes (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| StoreError::from_db(e, "recipe"))?;

        for ingredient_id in ingredient_ids {
            sqlx::query(
                r#"
                INSERT INTO recipes_ingredients (recipe_id, ingredient_id)
                VALUES ($1, $2)
                ON CONFLICT (recipe_id, ingredient_id) DO NOTHING
                "#,
            )
            .bind(recipe.id)
            .bind(ingredient_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::from_db(e, "recipe ingredient"))?;
        }

        tx.commit().await?;

        debug!(recipe_id = %recipe.id, name, ingredients = ingredient_ids.len(), "Recipe created");
        Ok(recipe)
    }

    /// Find recipe by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> StoreResult<Option<RecipeRecord>> {
        let recipe = sqlx::query_as::<_, RecipeRecord>(
            r#"
            SELECT id, name, created_at
            FROM recipes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(recipe)
    }

    /// Find recipe by name
    pub async fn find_by_name(pool: &PgPool, name: &str) -> StoreResult<Option<RecipeRecord>> {
        let recipe = sqlx::query_as::<_, RecipeRecord>(
            r#"
            SELECT id, name, created_at
            FROM recipes
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(pool)
        .await?;

        Ok(recipe)
    }

    /// List all recipes, ordered by name
    pub async fn list(pool: &PgPool) -> StoreResult<Vec<RecipeRecord>> {
        let recipes = sqlx::query_as::<_, RecipeRecord>(
            r#"
            SELECT id, name, created_at
            FROM recipes
            ORDER BY name ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(recipes)
    }

    /// Add an ingredient to a recipe (idempotent)
    pub async fn add_ingredient(
        pool: &PgPool,
        recipe_id: Uuid,
        ingredient_id: Uuid,
    ) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO recipes_ingredients (recipe_id, ingredient_id)
            VALUES ($1, $2)
            ON CONFLICT (recipe_id, ingredient_id) DO NOTHING
            "#,
        )
        .bind(recipe_id)
        .bind(ingredient_id)
        .execute(pool)
        .await
        .map_err(|e| StoreError::from_db(e, "recipe ingredient"))?;

        Ok(())
    }

    /// Remove an ingredient from a recipe
    ///
    /// Returns false when the ingredient is not part of the recipe.
    /// Refuses to remove the last ingredient so a stored recipe never
    /// drops below one ingredient, even under concurrent removals: the
    /// recipe's association rows are locked before the count so two
    /// removals from a two-ingredient recipe serialize instead of both
    /// passing the guard.
    pub async fn remove_ingredient(
        pool: &PgPool,
        recipe_id: Uuid,
        ingredient_id: Uuid,
    ) -> StoreResult<bool> {
        let mut tx = pool.begin().await?;

        let members = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT ingredient_id FROM recipes_ingredients
            WHERE recipe_id = $1
            FOR UPDATE
            "#,
        )
        .bind(recipe_id)
        .fetch_all(&mut *tx)
        .await?;

        if !members.contains(&ingredient_id) {
            return Ok(false);
        }
        if members.len() <= 1 {
            return Err(StoreError::Validation(
                "Recipe requires at least one ingredient".to_string(),
            ));
        }

        let result = sqlx::query(
            "DELETE FROM recipes_ingredients WHERE recipe_id = $1 AND ingredient_id = $2",
        )
        .bind(recipe_id)
        .bind(ingredient_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get the ingredient collection for a recipe, ordered by name
    pub async fn ingredients(pool: &PgPool, recipe_id: Uuid) -> StoreResult<Vec<IngredientRecord>> {
        let ingredients = sqlx::query_as::<_, IngredientRecord>(
            r#"
            SELECT i.id, i.name, i.calories, i.protein, i.carbs, i.fat, i.fiber,
                   i.serving_size, i.unit, i.created_at
            FROM ingredients i
            JOIN recipes_ingredients ri ON ri.ingredient_id = i.id
            WHERE ri.recipe_id = $1
            ORDER BY i.name ASC
            "#,
        )
        .bind(recipe_id)
        .fetch_all(pool)
        .await?;

        Ok(ingredients)
    }

    /// Delete a recipe
    ///
    /// Association rows are removed by the cascade; ingredients survive.
    pub async fn delete(pool: &PgPool, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
