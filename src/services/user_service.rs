use sqlx::PgPool;
use tracing::debug;

use crate::dto::account_dto::RegisterPayload;
use crate::error::{Error, Result};
use crate::models::user::User;
use crate::utils::password::{check_strength, hash_password, verify_password};
use validator::Validate;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user row with an already-computed hash. A duplicate username
    /// surfaces as `Conflict` via the unique constraint, never a pre-check.
    pub async fn create_user(&self, username: &str, password_hash: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Create the user and one default-enabled preference row per code, all
    /// in a single transaction so a failed provision leaves no user behind.
    pub async fn create_user_with_defaults(
        &self,
        username: &str,
        password_hash: &str,
        codes: &[String],
    ) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await?;

        for code in codes {
            sqlx::query(
                r#"
                INSERT INTO preferences (user_id, api_code)
                VALUES ($1, $2)
                "#,
            )
            .bind(user.id)
            .bind(code)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!(user_id = user.id, provisioned = codes.len(), "created user");

        Ok(user)
    }

    /// Full registration: validate the payload, enforce password strength,
    /// hash, then create with default preferences.
    pub async fn register(&self, payload: &RegisterPayload, codes: &[String]) -> Result<User> {
        payload.validate()?;
        if let Some(msg) = check_strength(&payload.password) {
            return Err(Error::BadRequest(msg.to_string()));
        }

        let secure_hash = hash_password(&payload.password)
            .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))?;

        self.create_user_with_defaults(&payload.username, &secure_hash, codes)
            .await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Return the user when the credentials match, `None` for both an
    /// unknown username and a wrong password.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.find_by_username(username).await? else {
            return Ok(None);
        };

        let ok = verify_password(password, &user.password_hash)
            .map_err(|e| Error::Internal(format!("Password verification failed: {}", e)))?;

        Ok(ok.then_some(user))
    }

    /// Delete the user row; the `ON DELETE CASCADE` on `preferences.user_id`
    /// removes the owned flags in the same statement.
    pub async fn delete_user(&self, id: i32) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("No user with id {}", id)));
        }

        debug!(user_id = id, "deleted user");
        Ok(())
    }
}
