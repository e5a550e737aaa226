pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(sqlx::Error),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Translate storage-level failures into the crate taxonomy so callers never
/// see raw Postgres error codes. Constraint violations become `Conflict` /
/// `NotFound`; connectivity failures become `Unavailable`.
impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    Error::Conflict(db_err.message().to_string())
                } else if db_err.is_foreign_key_violation() {
                    Error::NotFound(db_err.message().to_string())
                } else {
                    Error::Database(sqlx::Error::Database(db_err))
                }
            }
            err @ (sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)) => Error::Unavailable(err),
            other => Error::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = Error::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn pool_timeout_maps_to_unavailable() {
        let err = Error::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, Error::Unavailable(_)));
    }

    #[test]
    fn pool_closed_maps_to_unavailable() {
        let err = Error::from(sqlx::Error::PoolClosed);
        assert!(matches!(err, Error::Unavailable(_)));
    }

    #[test]
    fn worker_crash_stays_database() {
        let err = Error::from(sqlx::Error::WorkerCrashed);
        assert!(matches!(err, Error::Database(_)));
    }
}
