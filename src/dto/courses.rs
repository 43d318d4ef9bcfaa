use serde::Serialize;

use crate::domain::course::{ClassPlaceAndTime, Course};
use crate::domain::types::Semester;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    pub id: i32,
    pub year: i32,
    pub semester: Semester,
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
    pub class_times: Option<Vec<ClassPlaceAndTime>>,
}

impl From<Course> for CourseDto {
    fn from(value: Course) -> Self {
        Self {
            id: value.id.get(),
            year: value.year,
            semester: value.semester,
            classification: value.classification,
            college: value.college,
            department: value.department,
            academic_course: value.academic_course,
            academic_year: value.academic_year,
            course_number: value.course_number.into_inner(),
            lecture_number: value.lecture_number.into_inner(),
            course_title: value.course_title,
            credit: value.credit.get(),
            instructor: value.instructor,
            class_times: value.class_times,
        }
    }
}

/// One page of a keyset-paginated course search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSearchResponse {
    pub data: Vec<CourseDto>,
    pub next_id: Option<i32>,
    pub has_next: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchCoursesResponse {
    pub message: String,
    pub year: i32,
    pub semester: Semester,
    pub count: usize,
}
