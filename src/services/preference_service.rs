use sqlx::PgPool;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::preference::Preference;

#[derive(Clone)]
pub struct PreferenceService {
    pool: PgPool,
    /// Reported by `is_enabled` when no row exists for the pair.
    default_enabled: bool,
}

impl PreferenceService {
    pub fn new(pool: PgPool, default_enabled: bool) -> Self {
        Self {
            pool,
            default_enabled,
        }
    }

    /// Atomic upsert keyed on the (user_id, api_code) unique constraint.
    /// Concurrent callers never produce duplicate rows; the last commit wins.
    /// An unknown `user_id` trips the foreign key and surfaces as `NotFound`.
    pub async fn set_preference(
        &self,
        user_id: i32,
        api_code: &str,
        enabled: bool,
    ) -> Result<Preference> {
        let preference = sqlx::query_as::<_, Preference>(
            r#"
            INSERT INTO preferences (user_id, api_code, enabled)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, api_code) DO UPDATE SET enabled = EXCLUDED.enabled
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(api_code)
        .bind(enabled)
        .fetch_one(&self.pool)
        .await?;

        debug!(user_id, api_code, enabled, "preference set");
        Ok(preference)
    }

    pub async fn get_preferences(&self, user_id: i32) -> Result<Vec<Preference>> {
        let preferences = sqlx::query_as::<_, Preference>(
            r#"
            SELECT * FROM preferences
            WHERE user_id = $1
            ORDER BY api_code ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(preferences)
    }

    /// Absence of a row is not an error: it reports the configured default.
    pub async fn is_enabled(&self, user_id: i32, api_code: &str) -> Result<bool> {
        let row: Option<(bool,)> = sqlx::query_as(
            r#"
            SELECT enabled FROM preferences
            WHERE user_id = $1 AND api_code = $2
            "#,
        )
        .bind(user_id)
        .bind(api_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(enabled,)| enabled).unwrap_or(self.default_enabled))
    }

    /// Codes with an explicitly enabled row, ordered for determinism.
    pub async fn enabled_api_codes(&self, user_id: i32) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT api_code FROM preferences
            WHERE user_id = $1 AND enabled
            ORDER BY api_code ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(code,)| code).collect())
    }

    /// Rewrite every stored flag for the user in one statement: enabled
    /// becomes membership in `enabled_codes`. Rows are only updated, never
    /// created. Returns the number of rows touched.
    pub async fn apply_selection(&self, user_id: i32, enabled_codes: &[String]) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE preferences
            SET enabled = (api_code = ANY($2))
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(enabled_codes)
        .execute(&self.pool)
        .await?;

        debug!(user_id, updated = result.rows_affected(), "applied selection");
        Ok(result.rows_affected())
    }

    pub async fn remove_preference(&self, user_id: i32, api_code: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM preferences
            WHERE user_id = $1 AND api_code = $2
            "#,
        )
        .bind(user_id)
        .bind(api_code)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!(
                "No preference '{}' for user {}",
                api_code, user_id
            )));
        }

        Ok(())
    }
}
