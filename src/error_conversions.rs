//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service or repository error types, so
//! the `From` impls connecting them live here.

use crate::domain::types::TypeConstraintError;
use crate::forms::courses::{CourseSearchFormError, FetchCoursesFormError};
use crate::forms::timetables::CreateTimetableFormError;
use crate::repository::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<CourseSearchFormError> for ServiceError {
    fn from(val: CourseSearchFormError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}

impl From<FetchCoursesFormError> for ServiceError {
    fn from(val: FetchCoursesFormError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}

impl From<CreateTimetableFormError> for ServiceError {
    fn from(val: CreateTimetableFormError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}
