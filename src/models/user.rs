use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// Opaque to this layer: stored and returned verbatim, never inspected.
    #[serde(skip_serializing)]
    pub password_hash: String,
}
