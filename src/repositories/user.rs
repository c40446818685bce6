//! User repository for database operations

use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Stubbed capability flag: every stored user counts as authenticated.
    pub fn is_authenticated(&self) -> bool {
        true
    }

    /// Stubbed capability flag: every stored user counts as active.
    pub fn is_active(&self) -> bool {
        true
    }

    /// Stubbed capability flag: stored users are never anonymous.
    pub fn is_anonymous(&self) -> bool {
        false
    }

    /// Session-friendly string form of the primary key
    pub fn get_id(&self) -> String {
        self.id.to_string()
    }
}

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    ///
    /// Duplicate username or email surfaces as [`StoreError::Conflict`].
    pub async fn create(pool: &PgPool, username: &str, email: &str) -> StoreResult<UserRecord> {
        if username.trim().is_empty() {
            return Err(StoreError::Validation("Username cannot be empty".to_string()));
        }
        if email.trim().is_empty() {
            return Err(StoreError::Validation("Email cannot be empty".to_string()));
        }

        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (username, email)
            VALUES ($1, $2)
            RETURNING id, username, email, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .fetch_one(pool)
        .await
        .map_err(|e| StoreError::from_db(e, "user"))?;

        debug!(user_id = %user.id, username, "User created");
        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> StoreResult<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, email, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username(pool: &PgPool, username: &str) -> StoreResult<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, email, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(pool: &PgPool, email: &str) -> StoreResult<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, email, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Check if username exists
    pub async fn username_exists(pool: &PgPool, username: &str) -> StoreResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)
            "#,
        )
        .bind(username)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }

    /// Check if email exists
    pub async fn email_exists(pool: &PgPool, email: &str) -> StoreResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
            "#,
        )
        .bind(email)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }

    /// Delete a user
    pub async fn delete(pool: &PgPool, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(username: &str) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_capability_flags_are_stubbed() {
        let user = test_user("alice");
        assert!(user.is_authenticated());
        assert!(user.is_active());
        assert!(!user.is_anonymous());
    }

    #[test]
    fn test_get_id_is_uuid_string() {
        let user = test_user("bob");
        assert_eq!(user.get_id(), user.id.to_string());
    }
}
