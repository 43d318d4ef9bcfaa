use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::course::{
    ClassPlaceAndTime, Course as DomainCourse, NewCourse as DomainNewCourse,
};
use crate::domain::types::{
    CourseNumber, Credit, LectureNumber, Semester, TypeConstraintError,
};

/// Diesel model representing the `courses` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::courses)]
pub struct Course {
    pub id: i32,
    pub year: i32,
    pub semester: String,
    pub classification: Option<String>,
    pub college: Option<String>,
    pub department: Option<String>,
    pub academic_course: Option<String>,
    pub academic_year: Option<String>,
    pub course_number: String,
    pub lecture_number: String,
    pub course_title: String,
    pub credit: i32,
    pub instructor: Option<String>,
    /// JSON array of [`ClassPlaceAndTime`]; `NULL` when the schedule is unknown.
    pub class_times: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable/patchable form of [`Course`].
///
/// Every optional column is written on upsert so a re-ingested offering fully
/// replaces the stored one.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::courses, treat_none_as_null = true)]
pub struct NewCourse {
    pub year: i32,
    pub semester: String,
    pub classification: Option<String>,
    pub college: Option<String>,
    pub department: Option<String>,
    pub academic_course: Option<String>,
    pub academic_year: Option<String>,
    pub course_number: String,
    pub lecture_number: String,
    pub course_title: String,
    pub credit: i32,
    pub instructor: Option<String>,
    pub class_times: Option<String>,
}

fn decode_class_times(
    raw: Option<String>,
) -> Result<Option<Vec<ClassPlaceAndTime>>, TypeConstraintError> {
    raw.map(|json| {
        serde_json::from_str(&json)
            .map_err(|e| TypeConstraintError::InvalidValue(format!("class_times: {e}")))
    })
    .transpose()
}

impl TryFrom<Course> for DomainCourse {
    type Error = TypeConstraintError;

    fn try_from(course: Course) -> Result<Self, Self::Error> {
        Ok(Self {
            id: course.id.try_into()?,
            year: course.year,
            semester: Semester::try_from(course.semester)?,
            classification: course.classification,
            college: course.college,
            department: course.department,
            academic_course: course.academic_course,
            academic_year: course.academic_year,
            course_number: CourseNumber::new(course.course_number)?,
            lecture_number: LectureNumber::new(course.lecture_number)?,
            course_title: course.course_title,
            credit: Credit::new(course.credit)?,
            instructor: course.instructor,
            class_times: decode_class_times(course.class_times)?,
        })
    }
}

impl TryFrom<DomainNewCourse> for NewCourse {
    type Error = serde_json::Error;

    fn try_from(course: DomainNewCourse) -> Result<Self, Self::Error> {
        let class_times = course
            .class_times
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        Ok(Self {
            year: course.year,
            semester: course.semester.as_str().to_string(),
            classification: course.classification,
            college: course.college,
            department: course.department,
            academic_course: course.academic_course,
            academic_year: course.academic_year,
            course_number: course.course_number.into_inner(),
            lecture_number: course.lecture_number.into_inner(),
            course_title: course.course_title,
            credit: course.credit.get(),
            instructor: course.instructor,
            class_times,
        })
    }
}
