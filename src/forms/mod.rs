pub mod courses;
pub mod timetables;
