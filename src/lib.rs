//! Caltrack persistence layer
//!
//! PostgreSQL-backed storage for a calorie-tracking application:
//! user accounts, ingredients with per-serving nutrient facts, recipes
//! (named ingredient collections), and daily trackers whose nutrient
//! totals are derived at read time.
//!
//! ## Architecture
//!
//! - Repositories: sqlx data access, one module per entity
//! - Totals: in-memory nutrient aggregation over ingredient collections
//! - Database: PostgreSQL with SQLx, schema shipped as migrations

pub mod config;
pub mod db;
pub mod error;
pub mod repositories;
pub mod totals;

pub use error::{StoreError, StoreResult};
pub use totals::NutrientTotals;
