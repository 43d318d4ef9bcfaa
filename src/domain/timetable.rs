use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::course::Course;
use crate::domain::types::{CourseId, EnrollId, Semester, TimetableId, TimetableName, UserId};

/// A named schedule owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Timetable {
    pub id: TimetableId,
    pub user_id: UserId,
    pub name: TimetableName,
    pub year: i32,
    pub semester: Semester,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Timetable`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTimetable {
    pub user_id: UserId,
    pub name: TimetableName,
    pub year: i32,
    pub semester: Semester,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Membership of a course in a timetable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Enroll {
    pub id: EnrollId,
    pub timetable_id: TimetableId,
    pub course_id: CourseId,
}

/// Result of an attempt to add a course to a timetable.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrollOutcome {
    /// The course was added; carries the refreshed member list.
    Enrolled(Vec<Course>),
    /// The course is already a member of the timetable.
    AlreadyEnrolled,
    /// The course overlaps the contained member.
    Overlaps(Box<Course>),
}

/// Total credits of the supplied courses.
pub fn total_credits(courses: &[Course]) -> i64 {
    courses.iter().map(|c| i64::from(c.credit.get())).sum()
}
