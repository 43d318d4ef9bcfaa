use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested row does not exist.
    #[error("entity not found")]
    NotFound,
    /// A unique constraint rejected the write.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    /// The write references a row that no longer exists.
    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),
    /// Stored data could not be converted into a domain value.
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("database error: {0}")]
    DatabaseError(DieselError),
    #[error("connection error: {0}")]
    ConnectionError(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<DieselError> for RepositoryError {
    fn from(value: DieselError) -> Self {
        match value {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::ConstraintViolation(info.message().to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ForeignKeyViolation(info.message().to_string())
            }
            other => Self::DatabaseError(other),
        }
    }
}

impl From<diesel::r2d2::PoolError> for RepositoryError {
    fn from(value: diesel::r2d2::PoolError) -> Self {
        Self::ConnectionError(value.to_string())
    }
}
