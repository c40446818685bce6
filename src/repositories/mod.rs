//! Database repositories
//!
//! Provides the data access layer, one module per entity.

pub mod ingredient;
pub mod recipe;
pub mod tracker;
pub mod user;

pub use ingredient::{CreateIngredient, IngredientRecord, IngredientRepository};
pub use recipe::{RecipeRecord, RecipeRepository};
pub use tracker::{TrackerRecord, TrackerRepository};
pub use user::{UserRecord, UserRepository};
