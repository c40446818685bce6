//! Nutrient aggregation over ingredient collections
//!
//! Totals are a direct per-field sum: each ingredient contributes its full
//! per-serving nutrient values exactly once. There is no weighting by
//! serving size or consumed quantity, no unit conversion, and no rounding.

use crate::repositories::IngredientRecord;
use rust_decimal::Decimal;
use serde::Serialize;

/// Aggregate nutrient totals for a tracker's ingredient collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NutrientTotals {
    pub calories: Decimal,
    pub protein: Decimal,
    pub carbs: Decimal,
    pub fat: Decimal,
    pub fiber: Decimal,
}

/// Sum nutrient fields across a collection of ingredients
///
/// An empty collection yields all-zero totals.
pub fn sum_nutrients(ingredients: &[IngredientRecord]) -> NutrientTotals {
    ingredients
        .iter()
        .fold(NutrientTotals::default(), |acc, ing| NutrientTotals {
            calories: acc.calories + ing.calories,
            protein: acc.protein + ing.protein,
            carbs: acc.carbs + ing.carbs,
            fat: acc.fat + ing.fat,
            fiber: acc.fiber + ing.fiber,
        })
}

/// Total calories across a collection of ingredients
pub fn total_calories(ingredients: &[IngredientRecord]) -> Decimal {
    ingredients.iter().map(|i| i.calories).sum()
}

/// Total protein across a collection of ingredients
pub fn total_protein(ingredients: &[IngredientRecord]) -> Decimal {
    ingredients.iter().map(|i| i.protein).sum()
}

/// Total carbs across a collection of ingredients
pub fn total_carbs(ingredients: &[IngredientRecord]) -> Decimal {
    ingredients.iter().map(|i| i.carbs).sum()
}

/// Total fat across a collection of ingredients
pub fn total_fat(ingredients: &[IngredientRecord]) -> Decimal {
    ingredients.iter().map(|i| i.fat).sum()
}

/// Total fiber across a collection of ingredients
pub fn total_fiber(ingredients: &[IngredientRecord]) -> Decimal {
    ingredients.iter().map(|i| i.fiber).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    /// Helper to create a test ingredient with specified nutrition values
    fn test_ingredient(
        calories: Decimal,
        protein: Decimal,
        carbs: Decimal,
        fat: Decimal,
        fiber: Decimal,
    ) -> IngredientRecord {
        IngredientRecord {
            id: Uuid::new_v4(),
            name: format!("ingredient-{}", Uuid::new_v4()),
            calories,
            protein,
            carbs,
            fat,
            fiber,
            serving_size: Decimal::new(100, 0),
            unit: "g".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_sum_nutrients_empty() {
        let totals = sum_nutrients(&[]);
        assert_eq!(totals, NutrientTotals::default());
        assert_eq!(totals.calories, Decimal::ZERO);
    }

    #[test]
    fn test_sum_nutrients_two_ingredients() {
        let ingredients = vec![
            test_ingredient(
                Decimal::new(100, 0),
                Decimal::new(10, 0),
                Decimal::new(20, 0),
                Decimal::new(5, 0),
                Decimal::new(2, 0),
            ),
            test_ingredient(
                Decimal::new(250, 0),
                Decimal::new(15, 0),
                Decimal::new(30, 0),
                Decimal::new(8, 0),
                Decimal::new(4, 0),
            ),
        ];

        let totals = sum_nutrients(&ingredients);
        assert_eq!(totals.calories, Decimal::new(350, 0));
        assert_eq!(totals.protein, Decimal::new(25, 0));
        assert_eq!(totals.carbs, Decimal::new(50, 0));
        assert_eq!(totals.fat, Decimal::new(13, 0));
        assert_eq!(totals.fiber, Decimal::new(6, 0));
    }

    #[test]
    fn test_per_nutrient_helpers_agree_with_sum() {
        let ingredients = vec![
            test_ingredient(
                Decimal::new(300, 0),
                Decimal::new(20, 0),
                Decimal::new(30, 0),
                Decimal::new(10, 0),
                Decimal::new(3, 0),
            ),
            test_ingredient(
                Decimal::new(450, 0),
                Decimal::new(35, 0),
                Decimal::new(40, 0),
                Decimal::new(15, 0),
                Decimal::new(7, 0),
            ),
        ];

        let totals = sum_nutrients(&ingredients);
        assert_eq!(total_calories(&ingredients), totals.calories);
        assert_eq!(total_protein(&ingredients), totals.protein);
        assert_eq!(total_carbs(&ingredients), totals.carbs);
        assert_eq!(total_fat(&ingredients), totals.fat);
        assert_eq!(total_fiber(&ingredients), totals.fiber);
    }

    #[test]
    fn test_totals_serialize_with_five_keys() {
        let totals = sum_nutrients(&[test_ingredient(
            Decimal::new(100, 0),
            Decimal::new(10, 0),
            Decimal::new(20, 0),
            Decimal::new(5, 0),
            Decimal::new(2, 0),
        )]);

        let json = serde_json::to_value(&totals).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), 5);
        for key in ["calories", "protein", "carbs", "fat", "fiber"] {
            assert!(map.contains_key(key), "missing key {key}");
        }
    }

    #[test]
    fn test_no_weighting_by_serving_size() {
        // Two ingredients with identical nutrients but different serving
        // sizes must contribute identically.
        let mut a = test_ingredient(
            Decimal::new(100, 0),
            Decimal::new(1, 0),
            Decimal::new(1, 0),
            Decimal::new(1, 0),
            Decimal::new(1, 0),
        );
        let mut b = a.clone();
        b.name = "other".to_string();
        a.serving_size = Decimal::new(50, 0);
        b.serving_size = Decimal::new(500, 0);

        let totals = sum_nutrients(&[a, b]);
        assert_eq!(totals.calories, Decimal::new(200, 0));
    }
}
