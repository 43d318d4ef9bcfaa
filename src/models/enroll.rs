use diesel::prelude::*;

use crate::domain::types::{CourseId, TimetableId};

/// Insertable row of the `enrolls` table.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::enrolls)]
pub struct NewEnroll {
    pub timetable_id: i32,
    pub course_id: i32,
}

impl NewEnroll {
    pub fn new(timetable_id: TimetableId, course_id: CourseId) -> Self {
        Self {
            timetable_id: timetable_id.get(),
            course_id: course_id.get(),
        }
    }
}
