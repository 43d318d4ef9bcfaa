pub mod config;
pub mod course;
pub mod enroll;
pub mod timetable;
