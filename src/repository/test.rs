use std::sync::Mutex;

use crate::domain::course::{Course, NewCourse};
use crate::domain::timetable::{Enroll, EnrollOutcome, NewTimetable, Timetable};
use crate::domain::types::{CourseId, EnrollId, Semester, TimetableId, TimetableName, UserId};
use crate::repository::{
    CourseReader, CourseSearchQuery, CourseWriter, EnrollWriter, RepositoryError,
    RepositoryResult, TimetableReader, TimetableWriter,
};

/// ASCII case-insensitive substring match, the semantics of SQLite `LIKE`.
fn like_contains(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

fn matches_query(query: &CourseSearchQuery, course: &Course) -> bool {
    if course.year != query.year || course.semester != query.semester {
        return false;
    }
    if query.next_id.is_some_and(|next_id| course.id >= next_id) {
        return false;
    }
    match &query.keyword {
        Some(keyword) => {
            like_contains(&course.course_title, keyword)
                || course
                    .instructor
                    .as_deref()
                    .is_some_and(|instructor| like_contains(instructor, keyword))
        }
        None => true,
    }
}

#[derive(Default)]
struct State {
    courses: Vec<Course>,
    timetables: Vec<Timetable>,
    enrolls: Vec<Enroll>,
    next_enroll_id: i32,
}

/// Simple in-memory repository used for unit tests.
#[derive(Default)]
pub struct TestRepository {
    state: Mutex<State>,
}

impl TestRepository {
    pub fn new(courses: Vec<Course>, timetables: Vec<Timetable>) -> Self {
        Self {
            state: Mutex::new(State {
                courses,
                timetables,
                enrolls: Vec::new(),
                next_enroll_id: 1,
            }),
        }
    }

    /// Seed a membership without running the overlap check.
    pub fn with_enroll(self, timetable_id: i32, course_id: i32) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = EnrollId::new(state.next_enroll_id.max(1)).unwrap();
            state.next_enroll_id = id.get() + 1;
            state.enrolls.push(Enroll {
                id,
                timetable_id: TimetableId::new(timetable_id).unwrap(),
                course_id: CourseId::new(course_id).unwrap(),
            });
        }
        self
    }

    pub fn courses(&self) -> Vec<Course> {
        self.state.lock().unwrap().courses.clone()
    }

    pub fn timetables(&self) -> Vec<Timetable> {
        self.state.lock().unwrap().timetables.clone()
    }

    pub fn enrolls(&self) -> Vec<Enroll> {
        self.state.lock().unwrap().enrolls.clone()
    }

    fn members(state: &State, timetable_id: TimetableId) -> Vec<Course> {
        state
            .enrolls
            .iter()
            .filter(|e| e.timetable_id == timetable_id)
            .filter_map(|e| state.courses.iter().find(|c| c.id == e.course_id))
            .cloned()
            .collect()
    }
}

impl CourseReader for TestRepository {
    fn search_courses(&self, query: &CourseSearchQuery) -> RepositoryResult<Vec<Course>> {
        let state = self.state.lock().unwrap();
        let mut items: Vec<Course> = state
            .courses
            .iter()
            .filter(|c| matches_query(query, c))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.id.cmp(&a.id));
        items.truncate(query.limit);
        Ok(items)
    }

    fn get_course_by_id(&self, id: CourseId) -> RepositoryResult<Option<Course>> {
        let state = self.state.lock().unwrap();
        Ok(state.courses.iter().find(|c| c.id == id).cloned())
    }

    fn list_timetable_courses(&self, timetable_id: TimetableId) -> RepositoryResult<Vec<Course>> {
        let state = self.state.lock().unwrap();
        Ok(Self::members(&state, timetable_id))
    }
}

impl CourseWriter for TestRepository {
    fn upsert_courses(&self, courses: &[NewCourse]) -> RepositoryResult<usize> {
        let mut state = self.state.lock().unwrap();
        for draft in courses {
            let existing = state.courses.iter().position(|c| {
                c.year == draft.year
                    && c.semester == draft.semester
                    && c.course_number == draft.course_number
                    && c.lecture_number == draft.lecture_number
            });
            let id = match existing {
                Some(index) => state.courses[index].id,
                None => CourseId::new(state.courses.len() as i32 + 1).unwrap(),
            };
            let course = Course {
                id,
                year: draft.year,
                semester: draft.semester,
                classification: draft.classification.clone(),
                college: draft.college.clone(),
                department: draft.department.clone(),
                academic_course: draft.academic_course.clone(),
                academic_year: draft.academic_year.clone(),
                course_number: draft.course_number.clone(),
                lecture_number: draft.lecture_number.clone(),
                course_title: draft.course_title.clone(),
                credit: draft.credit,
                instructor: draft.instructor.clone(),
                class_times: draft.class_times.clone(),
            };
            match existing {
                Some(index) => state.courses[index] = course,
                None => state.courses.push(course),
            }
        }
        Ok(courses.len())
    }
}

impl TimetableReader for TestRepository {
    fn get_timetable_by_id(&self, id: TimetableId) -> RepositoryResult<Option<Timetable>> {
        let state = self.state.lock().unwrap();
        Ok(state.timetables.iter().find(|t| t.id == id).cloned())
    }

    fn list_timetables(&self, user_id: UserId) -> RepositoryResult<Vec<Timetable>> {
        let state = self.state.lock().unwrap();
        let mut items: Vec<Timetable> = state
            .timetables
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by_key(|t| t.id);
        Ok(items)
    }

    fn timetable_name_exists(
        &self,
        user_id: UserId,
        year: i32,
        semester: Semester,
        name: &TimetableName,
    ) -> RepositoryResult<bool> {
        let state = self.state.lock().unwrap();
        Ok(state.timetables.iter().any(|t| {
            t.user_id == user_id && t.year == year && t.semester == semester && &t.name == name
        }))
    }
}

impl TimetableWriter for TestRepository {
    fn create_timetable(&self, timetable: &NewTimetable) -> RepositoryResult<Timetable> {
        let mut state = self.state.lock().unwrap();
        let next_id = state.timetables.iter().map(|t| t.id.get()).max().unwrap_or(0) + 1;
        let stored = Timetable {
            id: TimetableId::new(next_id).unwrap(),
            user_id: timetable.user_id,
            name: timetable.name.clone(),
            year: timetable.year,
            semester: timetable.semester,
            created_at: timetable.created_at,
            updated_at: timetable.updated_at,
        };
        state.timetables.push(stored.clone());
        Ok(stored)
    }

    fn rename_timetable(
        &self,
        id: TimetableId,
        name: &TimetableName,
    ) -> RepositoryResult<Timetable> {
        let mut state = self.state.lock().unwrap();
        let timetable = state
            .timetables
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(RepositoryError::NotFound)?;
        timetable.name = name.clone();
        Ok(timetable.clone())
    }

    fn delete_timetable(&self, id: TimetableId) -> RepositoryResult<usize> {
        let mut state = self.state.lock().unwrap();
        state.enrolls.retain(|e| e.timetable_id != id);
        let before = state.timetables.len();
        state.timetables.retain(|t| t.id != id);
        Ok(before - state.timetables.len())
    }
}

impl EnrollWriter for TestRepository {
    fn enroll_course(
        &self,
        timetable_id: TimetableId,
        course: &Course,
    ) -> RepositoryResult<EnrollOutcome> {
        let mut state = self.state.lock().unwrap();
        if !state.timetables.iter().any(|t| t.id == timetable_id) {
            return Err(RepositoryError::ForeignKeyViolation(format!(
                "timetable {timetable_id} does not exist"
            )));
        }
        let members = Self::members(&state, timetable_id);

        if members.iter().any(|member| member.id == course.id) {
            return Ok(EnrollOutcome::AlreadyEnrolled);
        }
        if let Some(conflict) = course.find_conflict(&members) {
            return Ok(EnrollOutcome::Overlaps(Box::new(conflict.clone())));
        }

        let id = EnrollId::new(state.next_enroll_id.max(1)).unwrap();
        state.next_enroll_id = id.get() + 1;
        state.enrolls.push(Enroll {
            id,
            timetable_id,
            course_id: course.id,
        });

        Ok(EnrollOutcome::Enrolled(Self::members(&state, timetable_id)))
    }

    fn remove_enroll(
        &self,
        timetable_id: TimetableId,
        course_id: CourseId,
    ) -> RepositoryResult<usize> {
        let mut state = self.state.lock().unwrap();
        let before = state.enrolls.len();
        state
            .enrolls
            .retain(|e| !(e.timetable_id == timetable_id && e.course_id == course_id));
        Ok(before - state.enrolls.len())
    }
}
