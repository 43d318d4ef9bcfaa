//! Helpers for integration tests.

#![allow(dead_code)]

use chrono::Utc;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use sugang_timetable::db::{DbPool, establish_connection_pool};
use sugang_timetable::domain::course::{ClassPlaceAndTime, NewCourse};
use sugang_timetable::domain::timetable::NewTimetable;
use sugang_timetable::domain::types::{
    CourseNumber, Credit, DayOfWeek, LectureNumber, Semester, TimetableName, UserId,
};
use tempfile::NamedTempFile;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

pub fn slot(day: DayOfWeek, start_minute: i32, end_minute: i32) -> ClassPlaceAndTime {
    ClassPlaceAndTime {
        day,
        place: "301-101".to_string(),
        start_minute,
        end_minute,
    }
}

pub fn new_course(
    lecture_number: &str,
    title: &str,
    class_times: Option<Vec<ClassPlaceAndTime>>,
) -> NewCourse {
    NewCourse {
        year: 2024,
        semester: Semester::Fall,
        classification: Some("전선".to_string()),
        college: Some("공과대학".to_string()),
        department: Some("컴퓨터공학부".to_string()),
        academic_course: Some("학사".to_string()),
        academic_year: Some("3학년".to_string()),
        course_number: CourseNumber::new("4190.307").unwrap(),
        lecture_number: LectureNumber::new(lecture_number).unwrap(),
        course_title: title.to_string(),
        credit: Credit::new(3).unwrap(),
        instructor: Some("김교수".to_string()),
        class_times,
    }
}

pub fn new_timetable(user_id: i32, name: &str) -> NewTimetable {
    let now = Utc::now().naive_utc();
    NewTimetable {
        user_id: UserId::new(user_id).unwrap(),
        name: TimetableName::new(name).unwrap(),
        year: 2024,
        semester: Semester::Fall,
        created_at: now,
        updated_at: now,
    }
}
