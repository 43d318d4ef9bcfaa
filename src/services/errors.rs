use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The request carries no authenticated user.
    #[error("authentication required")]
    Unauthorized,
    /// Requested resource was not found.
    #[error("{0}")]
    NotFound(String),
    /// The user does not own the resource.
    #[error("{0}")]
    Forbidden(String),
    /// Input failed validation.
    #[error("{0}")]
    Validation(String),
    /// The request clashes with existing state.
    #[error("{0}")]
    Conflict(String),
    /// The registration site could not be reached or returned garbage.
    #[error("{0}")]
    Upstream(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

impl ServiceError {
    /// Stable machine-readable code sent to clients.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION",
            Self::Conflict(_) => "CONFLICT",
            Self::Upstream(_) => "UPSTREAM",
            Self::Internal => "INTERNAL",
        }
    }
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
