use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// The row changed (or vanished) between the caller's read and its write.
    #[error("The record was modified by another request, reload and retry")]
    ConcurrencyConflict,
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }

    /// Maps foreign key failures on insert/update to a readable constraint
    /// violation, leaving every other error untouched.
    pub fn describe_reference(self, what: &str) -> Self {
        if self.is_foreign_key_violation() {
            StorageError::ConstraintViolation(format!("Referenced {} does not exist", what))
        } else {
            self
        }
    }
}
