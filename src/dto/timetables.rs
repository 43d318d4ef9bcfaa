use serde::Serialize;

use crate::domain::course::Course;
use crate::domain::timetable::{Timetable, total_credits};
use crate::domain::types::Semester;
use crate::dto::courses::CourseDto;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimetableDto {
    pub id: i32,
    pub name: String,
    pub year: i32,
    pub semester: Semester,
}

impl From<Timetable> for TimetableDto {
    fn from(value: Timetable) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            year: value.year,
            semester: value.semester,
        }
    }
}

/// A timetable with its member courses and their credit total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimetableDetailDto {
    pub timetable: TimetableDto,
    pub courses: Vec<CourseDto>,
    pub credits: i64,
}

impl TimetableDetailDto {
    pub fn new(timetable: Timetable, courses: Vec<Course>) -> Self {
        let credits = total_credits(&courses);
        Self {
            timetable: timetable.into(),
            courses: courses.into_iter().map(CourseDto::from).collect(),
            credits,
        }
    }
}
