pub mod course;
pub mod timetable;
pub mod types;
