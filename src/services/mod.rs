use chrono::{Datelike, Utc};

pub mod course_fetch;
pub mod courses;
pub mod errors;
pub mod timetables;

pub use errors::{ServiceError, ServiceResult};

/// Calendar year used as the upper bound of the accepted year window.
pub(crate) fn current_year() -> i32 {
    Utc::now().year()
}
