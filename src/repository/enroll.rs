use diesel::prelude::*;

use crate::domain::course::Course;
use crate::domain::timetable::EnrollOutcome;
use crate::domain::types::{CourseId, TimetableId};
use crate::models::enroll::NewEnroll;
use crate::repository::course::load_timetable_courses;
use crate::repository::{
    DieselRepository, EnrollWriter, RepositoryError, RepositoryResult,
};

impl EnrollWriter for DieselRepository {
    fn enroll_course(
        &self,
        timetable_id: TimetableId,
        course: &Course,
    ) -> RepositoryResult<EnrollOutcome> {
        use crate::schema::enrolls;

        let mut conn = self.conn()?;

        // IMMEDIATE takes the write lock up front so concurrent additions to
        // the same timetable cannot both pass the overlap check.
        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let members = load_timetable_courses(conn, timetable_id)?;

            if members.iter().any(|member| member.id == course.id) {
                return Ok(EnrollOutcome::AlreadyEnrolled);
            }

            if let Some(conflict) = course.find_conflict(&members) {
                return Ok(EnrollOutcome::Overlaps(Box::new(conflict.clone())));
            }

            diesel::insert_into(enrolls::table)
                .values(NewEnroll::new(timetable_id, course.id))
                .execute(conn)?;

            Ok(EnrollOutcome::Enrolled(load_timetable_courses(
                conn,
                timetable_id,
            )?))
        })
    }

    fn remove_enroll(
        &self,
        timetable_id: TimetableId,
        course_id: CourseId,
    ) -> RepositoryResult<usize> {
        use crate::schema::enrolls;

        let mut conn = self.conn()?;

        let affected = diesel::delete(
            enrolls::table
                .filter(enrolls::timetable_id.eq(timetable_id.get()))
                .filter(enrolls::course_id.eq(course_id.get())),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }
}
