use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::timetable::{
    NewTimetable as DomainNewTimetable, Timetable as DomainTimetable,
};
use crate::domain::types::{Semester, TimetableName, TypeConstraintError};

/// Diesel model representing the `timetables` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::timetables)]
pub struct Timetable {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub year: i32,
    pub semester: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::timetables)]
pub struct NewTimetable {
    pub user_id: i32,
    pub name: String,
    pub year: i32,
    pub semester: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Timetable> for DomainTimetable {
    type Error = TypeConstraintError;

    fn try_from(timetable: Timetable) -> Result<Self, Self::Error> {
        Ok(Self {
            id: timetable.id.try_into()?,
            user_id: timetable.user_id.try_into()?,
            name: TimetableName::new(timetable.name)?,
            year: timetable.year,
            semester: Semester::try_from(timetable.semester)?,
            created_at: timetable.created_at,
            updated_at: timetable.updated_at,
        })
    }
}

impl From<DomainNewTimetable> for NewTimetable {
    fn from(timetable: DomainNewTimetable) -> Self {
        Self {
            user_id: timetable.user_id.get(),
            name: timetable.name.into_inner(),
            year: timetable.year,
            semester: timetable.semester.as_str().to_string(),
            created_at: timetable.created_at,
            updated_at: timetable.updated_at,
        }
    }
}
