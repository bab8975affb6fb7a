//! Error type shared by every storage trait.

/// Failure reported by the entity store.
///
/// A uniqueness violation is kept distinguishable from everything else
/// because callers turn it into a user-facing outcome.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::UniqueViolation(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::UniqueViolation(db_err.message().to_string())
            }
            other => StoreError::Backend(other.into()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
