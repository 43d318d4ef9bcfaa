use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::timetable::NewTimetable;
use crate::domain::types::{Semester, TimetableName, TypeConstraintError, UserId};

/// Body of `POST /timetables`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTimetableForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub year: i32,
    pub semester: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTimetablePayload {
    pub name: TimetableName,
    pub year: i32,
    pub semester: Semester,
}

impl CreateTimetablePayload {
    pub fn into_new_timetable(self, user_id: UserId) -> NewTimetable {
        let now = Utc::now().naive_utc();
        NewTimetable {
            user_id,
            name: self.name,
            year: self.year,
            semester: self.semester,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum CreateTimetableFormError {
    #[error("Create timetable form validation failed: {0}")]
    Validation(String),
    #[error("Create timetable form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CreateTimetableFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CreateTimetableFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreateTimetableForm> for CreateTimetablePayload {
    type Error = CreateTimetableFormError;

    fn try_from(value: CreateTimetableForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            name: TimetableName::new(value.name)?,
            year: value.year,
            semester: Semester::try_from(value.semester)?,
        })
    }
}

/// Body of `PATCH /timetables/{id}`.
///
/// The name is checked by the service after ownership so that a missing or
/// foreign timetable is reported before a bad name.
#[derive(Debug, Deserialize)]
pub struct UpdateTimetableForm {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_form_trims_name() {
        let payload = CreateTimetablePayload::try_from(CreateTimetableForm {
            name: " 2025-2 시간표 ".to_string(),
            year: 2025,
            semester: "FALL".to_string(),
        })
        .unwrap();
        assert_eq!(payload.name, "2025-2 시간표");
        assert_eq!(payload.semester, Semester::Fall);
    }

    #[test]
    fn create_form_rejects_blank_name() {
        let result = CreateTimetablePayload::try_from(CreateTimetableForm {
            name: "   ".to_string(),
            year: 2025,
            semester: "FALL".to_string(),
        });
        assert!(matches!(
            result,
            Err(CreateTimetableFormError::TypeConstraint(_))
        ));
    }

    #[test]
    fn create_form_rejects_unknown_semester() {
        let result = CreateTimetablePayload::try_from(CreateTimetableForm {
            name: "main".to_string(),
            year: 2025,
            semester: "AUTUMN".to_string(),
        });
        assert!(result.is_err());
    }
}
