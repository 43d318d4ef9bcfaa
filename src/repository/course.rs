use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::course::{Course, NewCourse};
use crate::domain::types::{CourseId, TimetableId};
use crate::models::course::{Course as DbCourse, NewCourse as DbNewCourse};
use crate::repository::{
    CourseReader, CourseSearchQuery, CourseWriter, DieselRepository, RepositoryError,
    RepositoryResult,
};

/// Escape `LIKE` wildcards so user keywords match literally.
fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Members of a timetable ordered by when they were added.
pub(crate) fn load_timetable_courses(
    conn: &mut SqliteConnection,
    timetable_id: TimetableId,
) -> RepositoryResult<Vec<Course>> {
    use crate::schema::{courses, enrolls};

    let items = courses::table
        .inner_join(enrolls::table)
        .filter(enrolls::timetable_id.eq(timetable_id.get()))
        .order(enrolls::id.asc())
        .select(DbCourse::as_select())
        .load::<DbCourse>(conn)?
        .into_iter()
        .map(TryInto::try_into)
        .collect::<Result<Vec<Course>, _>>()?;

    Ok(items)
}

impl CourseReader for DieselRepository {
    fn search_courses(&self, query: &CourseSearchQuery) -> RepositoryResult<Vec<Course>> {
        use crate::schema::courses;

        let mut conn = self.conn()?;

        let mut items = courses::table
            .filter(courses::year.eq(query.year))
            .filter(courses::semester.eq(query.semester.as_str()))
            .into_boxed::<Sqlite>();

        if let Some(keyword) = query.keyword.as_deref() {
            let pattern = format!("%{}%", escape_like(keyword));
            items = items.filter(
                courses::course_title
                    .like(pattern.clone())
                    .escape('\\')
                    .or(courses::instructor.like(pattern).escape('\\')),
            );
        }

        if let Some(next_id) = query.next_id {
            items = items.filter(courses::id.lt(next_id.get()));
        }

        let items = items
            .order(courses::id.desc())
            .limit(query.limit as i64)
            .load::<DbCourse>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Course>, _>>()?;

        Ok(items)
    }

    fn get_course_by_id(&self, id: CourseId) -> RepositoryResult<Option<Course>> {
        use crate::schema::courses;

        let mut conn = self.conn()?;

        let course = courses::table
            .filter(courses::id.eq(id.get()))
            .first::<DbCourse>(&mut conn)
            .optional()?;

        let course = course.map(TryInto::try_into).transpose()?;
        Ok(course)
    }

    fn list_timetable_courses(&self, timetable_id: TimetableId) -> RepositoryResult<Vec<Course>> {
        let mut conn = self.conn()?;
        load_timetable_courses(&mut conn, timetable_id)
    }
}

impl CourseWriter for DieselRepository {
    fn upsert_courses(&self, courses: &[NewCourse]) -> RepositoryResult<usize> {
        use crate::schema::courses;

        let rows = courses
            .iter()
            .cloned()
            .map(DbNewCourse::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, RepositoryError, _>(|conn| {
            let mut affected = 0;
            for row in &rows {
                affected += diesel::insert_into(courses::table)
                    .values(row)
                    .on_conflict((
                        courses::year,
                        courses::semester,
                        courses::course_number,
                        courses::lecture_number,
                    ))
                    .do_update()
                    .set((row, courses::updated_at.eq(diesel::dsl::now)))
                    .execute(conn)?;
            }
            Ok(affected)
        })?;

        Ok(affected)
    }
}
