//! Client side of the registration site: export downloads, lecture lookups
//! and the parsing that turns them into course drafts.

use std::future::Future;

use crate::domain::types::Semester;

pub mod class_time;
pub mod client;
pub mod error;
pub mod lecture_info;
pub mod sheet;

pub use client::SugangClient;
pub use error::SugangError;
pub use lecture_info::LectureInfo;

/// Language of a course-list export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportLanguage {
    Korean,
    English,
}

impl ExportLanguage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Korean => "ko",
            Self::English => "en",
        }
    }
}

/// Source of raw course data for a term.
pub trait CourseSource {
    /// Download the course-list spreadsheet in the given language.
    fn download_courses_excel(
        &self,
        year: i32,
        semester: Semester,
        language: ExportLanguage,
    ) -> impl Future<Output = Result<Vec<u8>, SugangError>>;

    /// Look up the detail record of one lecture.
    fn get_lecture_info(
        &self,
        year: i32,
        semester: Semester,
        course_number: &str,
        lecture_number: &str,
    ) -> impl Future<Output = Result<LectureInfo, SugangError>>;
}
