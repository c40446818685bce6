//! Ingredient repository - database operations for nutrient facts

use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

/// Ingredient record from the database
///
/// Nutrient fields are per-serving values and are all mandatory.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct IngredientRecord {
    pub id: Uuid,
    pub name: String,
    pub calories: Decimal,
    pub protein: Decimal,
    pub carbs: Decimal,
    pub fat: Decimal,
    pub fiber: Decimal,
    pub serving_size: Decimal,
    pub unit: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new ingredient
#[derive(Debug, Clone)]
pub struct CreateIngredient {
    pub name: String,
    pub calories: Decimal,
    pub protein: Decimal,
    pub carbs: Decimal,
    pub fat: Decimal,
    pub fiber: Decimal,
    pub serving_size: Decimal,
    pub unit: String,
}

impl CreateIngredient {
    fn validate(&self) -> StoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(StoreError::Validation("Ingredient name cannot be empty".to_string()));
        }
        if self.serving_size <= Decimal::ZERO {
            return Err(StoreError::Validation("Serving size must be positive".to_string()));
        }
        if self.unit.trim().is_empty() {
            return Err(StoreError::Validation("Unit cannot be empty".to_string()));
        }

        let nutrients = [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
            ("fiber", self.fiber),
        ];
        for (field, value) in nutrients {
            if value < Decimal::ZERO {
                return Err(StoreError::Validation(format!("{field} cannot be negative")));
            }
        }

        Ok(())
    }
}

/// Ingredient repository
pub struct IngredientRepository;

impl IngredientRepository {
    /// Create a new ingredient
    ///
    /// Duplicate name surfaces as [`StoreError::Conflict`].
    pub async fn create(pool: &PgPool, input: CreateIngredient) -> StoreResult<IngredientRecord> {
        input.validate()?;

        let ingredient = sqlx::query_as::<_, IngredientRecord>(
            r#"
            INSERT INTO ingredients (name, calories, protein, carbs, fat, fiber, serving_size, unit)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, calories, protein, carbs, fat, fiber, serving_size, unit, created_at
            "#,
        )
        .bind(&input.name)
        .bind(input.calories)
        .bind(input.protein)
        .bind(input.carbs)
        .bind(input.fat)
        .bind(input.fiber)
        .bind(input.serving_size)
        .bind(&input.unit)
        .fetch_one(pool)
        .await
        .map_err(|e| StoreError::from_db(e, "ingredient"))?;

        debug!(ingredient_id = %ingredient.id, name = %ingredient.name, "Ingredient created");
        Ok(ingredient)
    }

    /// Find ingredient by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> StoreResult<Option<IngredientRecord>> {
        let ingredient = sqlx::query_as::<_, IngredientRecord>(
            r#"
            SELECT id, name, calories, protein, carbs, fat, fiber, serving_size, unit, created_at
            FROM ingredients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(ingredient)
    }

    /// Find ingredient by name
    pub async fn find_by_name(pool: &PgPool, name: &str) -> StoreResult<Option<IngredientRecord>> {
        let ingredient = sqlx::query_as::<_, IngredientRecord>(
            r#"
            SELECT id, name, calories, protein, carbs, fat, fiber, serving_size, unit, created_at
            FROM ingredients
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(pool)
        .await?;

        Ok(ingredient)
    }

    /// List all ingredients, ordered by name
    pub async fn list(pool: &PgPool) -> StoreResult<Vec<IngredientRecord>> {
        let ingredients = sqlx::query_as::<_, IngredientRecord>(
            r#"
            SELECT id, name, calories, protein, carbs, fat, fiber, serving_size, unit, created_at
            FROM ingredients
            ORDER BY name ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(ingredients)
    }

    /// Delete an ingredient
    ///
    /// Association rows referencing it are removed by the cascade.
    pub async fn delete(pool: &PgPool, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM ingredients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn valid_input() -> CreateIngredient {
        CreateIngredient {
            name: "Oats".to_string(),
            calories: Decimal::new(389, 0),
            protein: Decimal::new(169, 1),
            carbs: Decimal::new(663, 1),
            fat: Decimal::new(69, 1),
            fiber: Decimal::new(106, 1),
            serving_size: Decimal::new(100, 0),
            unit: "g".to_string(),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(valid_input().validate().is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_blank_name_rejected(#[case] name: &str) {
        let mut input = valid_input();
        input.name = name.to_string();
        assert!(matches!(input.validate(), Err(StoreError::Validation(_))));
    }

    #[rstest]
    #[case(Decimal::ZERO)]
    #[case(Decimal::new(-1, 0))]
    fn test_non_positive_serving_size_rejected(#[case] serving_size: Decimal) {
        let mut input = valid_input();
        input.serving_size = serving_size;
        assert!(matches!(input.validate(), Err(StoreError::Validation(_))));
    }

    #[test]
    fn test_negative_nutrient_rejected() {
        let mut input = valid_input();
        input.fiber = Decimal::new(-5, 1);
        let err = input.validate().unwrap_err();
        assert!(err.to_string().contains("Validation"));
    }

    #[test]
    fn test_blank_unit_rejected() {
        let mut input = valid_input();
        input.unit = " ".to_string();
        assert!(matches!(input.validate(), Err(StoreError::Validation(_))));
    }
}
