//! Ingestion of a term's course catalog from the registration site.

use futures::stream::{self, StreamExt};

use crate::domain::course::NewCourse;
use crate::domain::types::{Semester, ensure_year_in_window};
use crate::repository::CourseWriter;
use crate::sugang::lecture_info::apply_lecture_info;
use crate::sugang::sheet::courses_from_exports;
use crate::sugang::{CourseSource, ExportLanguage};

use super::{ServiceError, ServiceResult, current_year};

const PROGRESS_EVERY: usize = 100;

async fn enrich_course<S>(source: &S, course: NewCourse) -> NewCourse
where
    S: CourseSource,
{
    let lookup = source
        .get_lecture_info(
            course.year,
            course.semester,
            course.course_number.as_str(),
            course.lecture_number.as_str(),
        )
        .await;

    match lookup {
        Ok(info) => apply_lecture_info(course, &info),
        Err(e) => {
            log::warn!(
                "Failed to enrich course {}-{}: {e}",
                course.course_number,
                course.lecture_number
            );
            course
        }
    }
}

/// Downloads both course-list exports for a term, enriches every course with
/// its lecture detail and upserts the result. Returns the number of courses.
///
/// Download or workbook failures abort the run. Failures of individual rows
/// or lookups are logged and the affected course is kept in its best form.
pub async fn fetch_and_save_courses<S, R>(
    year: i32,
    semester: Semester,
    source: &S,
    repo: &R,
    concurrency: usize,
) -> ServiceResult<usize>
where
    S: CourseSource,
    R: CourseWriter,
{
    ensure_year_in_window(year, current_year())?;

    let (korean, english) = futures::try_join!(
        source.download_courses_excel(year, semester, ExportLanguage::Korean),
        source.download_courses_excel(year, semester, ExportLanguage::English),
    )
    .map_err(|e| {
        log::error!("Failed to download course lists for {year} {semester}: {e}");
        ServiceError::Upstream("failed to download course list".to_string())
    })?;

    let drafts = courses_from_exports(&korean, &english, year, semester).map_err(|e| {
        log::error!("Failed to read course lists for {year} {semester}: {e}");
        ServiceError::Upstream("failed to read course list".to_string())
    })?;

    let total = drafts.len();
    log::info!("Parsed {total} courses for {year} {semester}, fetching lecture details");

    let courses: Vec<NewCourse> = stream::iter(drafts.into_iter().enumerate())
        .map(|(idx, draft)| async move {
            if idx % PROGRESS_EVERY == 0 {
                log::info!("Enriching course {idx}/{total}");
            }
            enrich_course(source, draft).await
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    repo.upsert_courses(&courses).map_err(|e| {
        log::error!("Failed to save courses for {year} {semester}: {e}");
        ServiceError::Internal
    })?;

    log::info!("Saved {} courses for {year} {semester}", courses.len());
    Ok(courses.len())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rust_xlsxwriter::Workbook;

    use super::*;
    use crate::repository::test::TestRepository;
    use crate::sugang::{LectureInfo, SugangError};

    const HEADER: [&str; 13] = [
        "교과구분",
        "개설대학",
        "개설학과",
        "이수과정",
        "학년",
        "교과목번호",
        "강좌번호",
        "교과목명",
        "부제명",
        "학점",
        "수업교시",
        "강의실(동-호)(#연건, *평창)",
        "주담당교수",
    ];

    fn workbook(rows: &[[&str; 13]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "2025학년도 1학기 수강편람").unwrap();
        for (col, name) in HEADER.iter().enumerate() {
            sheet.write_string(2, col as u16, *name).unwrap();
        }
        for (idx, row) in rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                sheet
                    .write_string(idx as u32 + 3, col as u16, *value)
                    .unwrap();
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    struct FakeSource {
        export: Option<Vec<u8>>,
        lookups: AtomicUsize,
    }

    impl CourseSource for FakeSource {
        async fn download_courses_excel(
            &self,
            _year: i32,
            _semester: Semester,
            _language: ExportLanguage,
        ) -> Result<Vec<u8>, SugangError> {
            self.export.clone().ok_or(SugangError::MissingSheet)
        }

        async fn get_lecture_info(
            &self,
            _year: i32,
            _semester: Semester,
            course_number: &str,
            _lecture_number: &str,
        ) -> Result<LectureInfo, SugangError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if course_number == "BROKEN" {
                return Ok(serde_json::from_str::<LectureInfo>("not json")?);
            }
            Ok(serde_json::from_str(
                r#"{"ltTime": ["월(09:00~10:15)"], "ltRoom": ["43-1-101"],
                    "LISTTAB01": {"profNm": "김교수 (1234)"}}"#,
            )?)
        }
    }

    fn source(rows: &[[&str; 13]]) -> FakeSource {
        FakeSource {
            export: Some(workbook(rows)),
            lookups: AtomicUsize::new(0),
        }
    }

    const ROW_A: [&str; 13] = [
        "전필", "공과대학", "컴퓨터공학부", "학사", "3", "4190.310", "001", "운영체제", "", "3",
        "", "", "",
    ];
    const ROW_B: [&str; 13] = [
        "교양", "", "", "학사", "1", "BROKEN", "002", "대학글쓰기", "", "2", "화(10:00~11:50)",
        "1-101", "박교수",
    ];

    #[actix_web::test]
    async fn fetch_enriches_and_saves_courses_in_row_order() {
        let source = source(&[ROW_A, ROW_B]);
        let repo = TestRepository::default();

        let count = fetch_and_save_courses(2025, Semester::Spring, &source, &repo, 4)
            .await
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(source.lookups.load(Ordering::SeqCst), 2);

        let saved = repo.courses();
        assert_eq!(saved[0].course_number, "4190.310");
        assert_eq!(saved[0].instructor.as_deref(), Some("김교수"));
        assert_eq!(saved[0].class_times.as_ref().unwrap()[0].place, "43-1-101");

        // A failed lookup keeps the spreadsheet draft.
        assert_eq!(saved[1].course_number, "BROKEN");
        assert_eq!(saved[1].instructor.as_deref(), Some("박교수"));
        assert_eq!(saved[1].class_times.as_ref().unwrap()[0].place, "1-101");
    }

    #[actix_web::test]
    async fn refetching_updates_instead_of_duplicating() {
        let source = source(&[ROW_A]);
        let repo = TestRepository::default();

        fetch_and_save_courses(2025, Semester::Spring, &source, &repo, 1)
            .await
            .unwrap();
        fetch_and_save_courses(2025, Semester::Spring, &source, &repo, 1)
            .await
            .unwrap();

        assert_eq!(repo.courses().len(), 1);
    }

    #[actix_web::test]
    async fn download_failure_is_upstream_error() {
        let source = FakeSource {
            export: None,
            lookups: AtomicUsize::new(0),
        };
        let repo = TestRepository::default();

        let result = fetch_and_save_courses(2025, Semester::Spring, &source, &repo, 4).await;
        assert!(matches!(result, Err(ServiceError::Upstream(_))));
        assert!(repo.courses().is_empty());
    }

    #[actix_web::test]
    async fn unreadable_workbook_is_upstream_error() {
        let source = FakeSource {
            export: Some(b"<html>maintenance</html>".to_vec()),
            lookups: AtomicUsize::new(0),
        };
        let repo = TestRepository::default();

        let result = fetch_and_save_courses(2025, Semester::Spring, &source, &repo, 4).await;
        assert!(matches!(result, Err(ServiceError::Upstream(_))));
    }
}
