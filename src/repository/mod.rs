use crate::db::{DbConnection, DbPool};
use crate::domain::course::{Course, NewCourse};
use crate::domain::timetable::{EnrollOutcome, NewTimetable, Timetable};
use crate::domain::types::{CourseId, Semester, TimetableId, TimetableName, UserId};

pub mod course;
pub mod enroll;
pub mod errors;
#[cfg(test)]
pub mod test;
pub mod timetable;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Keyset-paginated course search within one term.
#[derive(Debug, Clone)]
pub struct CourseSearchQuery {
    pub year: i32,
    pub semester: Semester,
    /// Substring matched against the title or the instructor, ignoring ASCII
    /// case.
    pub keyword: Option<String>,
    /// Only rows with an id strictly below this cursor are returned.
    pub next_id: Option<CourseId>,
    /// Maximum number of rows to load.
    pub limit: usize,
}

impl CourseSearchQuery {
    pub fn new(year: i32, semester: Semester) -> Self {
        Self {
            year,
            semester,
            keyword: None,
            next_id: None,
            limit: 20,
        }
    }
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }
    pub fn before(mut self, next_id: CourseId) -> Self {
        self.next_id = Some(next_id);
        self
    }
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Read-only operations for catalog courses.
pub trait CourseReader {
    /// Search courses of a term ordered by id descending.
    fn search_courses(&self, query: &CourseSearchQuery) -> RepositoryResult<Vec<Course>>;
    /// Retrieve a course by its identifier.
    fn get_course_by_id(&self, id: CourseId) -> RepositoryResult<Option<Course>>;
    /// List the members of a timetable in insertion order.
    fn list_timetable_courses(&self, timetable_id: TimetableId) -> RepositoryResult<Vec<Course>>;
}

/// Write operations for catalog courses.
pub trait CourseWriter {
    /// Insert or replace courses keyed by `(year, semester, course_number,
    /// lecture_number)` in a single transaction.
    fn upsert_courses(&self, courses: &[NewCourse]) -> RepositoryResult<usize>;
}

/// Read-only operations for timetables.
pub trait TimetableReader {
    fn get_timetable_by_id(&self, id: TimetableId) -> RepositoryResult<Option<Timetable>>;
    /// List timetables owned by `user_id` ordered by id.
    fn list_timetables(&self, user_id: UserId) -> RepositoryResult<Vec<Timetable>>;
    /// Check whether the owner already uses `name` in the given term.
    fn timetable_name_exists(
        &self,
        user_id: UserId,
        year: i32,
        semester: Semester,
        name: &TimetableName,
    ) -> RepositoryResult<bool>;
}

/// Write operations for timetables.
pub trait TimetableWriter {
    /// Persist a new timetable and return the stored record.
    fn create_timetable(&self, timetable: &NewTimetable) -> RepositoryResult<Timetable>;
    /// Change the name of a timetable and return the updated record.
    fn rename_timetable(&self, id: TimetableId, name: &TimetableName)
    -> RepositoryResult<Timetable>;
    /// Delete a timetable together with its memberships.
    fn delete_timetable(&self, id: TimetableId) -> RepositoryResult<usize>;
}

/// Write operations for timetable memberships.
pub trait EnrollWriter {
    /// Add `course` to the timetable unless it is already a member or
    /// overlaps an existing member. The check and the insert are atomic.
    fn enroll_course(
        &self,
        timetable_id: TimetableId,
        course: &Course,
    ) -> RepositoryResult<EnrollOutcome>;
    /// Remove a membership, returning the number of deleted rows.
    fn remove_enroll(&self, timetable_id: TimetableId, course_id: CourseId)
    -> RepositoryResult<usize>;
}
