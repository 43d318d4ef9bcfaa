//! Conversion of the course-list spreadsheets into course drafts.
//!
//! The site exports the same listing in Korean and English. Both are read as
//! string grids, fused row by row and addressed through the Korean header row.

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::domain::course::NewCourse;
use crate::domain::types::{CourseNumber, Credit, LectureNumber, Semester, TypeConstraintError};
use crate::sugang::class_time::parse_class_times;
use crate::sugang::error::SugangError;

/// Index of the header row; rows after it are course data.
pub const HEADER_ROW: usize = 2;

const COL_CLASSIFICATION: &str = "교과구분";
const COL_COLLEGE: &str = "개설대학";
const COL_DEPARTMENT: &str = "개설학과";
const COL_ACADEMIC_COURSE: &str = "이수과정";
const COL_ACADEMIC_YEAR: &str = "학년";
const COL_COURSE_NUMBER: &str = "교과목번호";
const COL_LECTURE_NUMBER: &str = "강좌번호";
const COL_COURSE_TITLE: &str = "교과목명";
const COL_COURSE_SUBTITLE: &str = "부제명";
const COL_CREDIT: &str = "학점";
const COL_CLASS_TIME: &str = "수업교시";
const COL_LOCATION: &str = "강의실(동-호)(#연건, *평창)";
const COL_INSTRUCTOR: &str = "주담당교수";

const UNDERGRADUATE: &str = "학사";

pub type Grid = Vec<Vec<String>>;

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        _ => cell.to_string(),
    }
}

/// Reads the first worksheet of an `.xls`/`.xlsx` payload into a grid whose
/// indices match the sheet's absolute row and column positions.
pub fn read_grid(bytes: &[u8]) -> Result<Grid, SugangError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SugangError::MissingSheet)??;

    let Some((start_row, start_col)) = range.start() else {
        return Ok(Vec::new());
    };

    let mut grid: Grid = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![String::new(); start_col as usize];
        cells.extend(row.iter().map(cell_to_string));
        grid.push(cells);
    }

    Ok(grid)
}

/// Concatenates the Korean and English rows pairwise. The result is as long
/// as the shorter grid.
pub fn fuse_grids(korean: Grid, english: Grid) -> Grid {
    korean
        .into_iter()
        .zip(english)
        .map(|(mut korean_row, english_row)| {
            korean_row.extend(english_row);
            korean_row
        })
        .collect()
}

/// Maps header text to its column. The first occurrence of a name wins so the
/// Korean half of a fused row takes precedence.
pub fn column_index(header: &[String]) -> HashMap<String, usize> {
    let mut columns = HashMap::new();
    for (idx, name) in header.iter().enumerate() {
        columns.entry(name.trim().to_string()).or_insert(idx);
    }
    columns
}

struct Row<'a> {
    cells: &'a [String],
    columns: &'a HashMap<String, usize>,
}

impl Row<'_> {
    fn get(&self, column: &str) -> &str {
        self.columns
            .get(column)
            .and_then(|idx| self.cells.get(*idx))
            .map(|value| value.trim())
            .unwrap_or_default()
    }

    fn optional(&self, column: &str) -> Option<String> {
        non_blank(self.get(column))
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Credits arrive either as `3` or as a float rendering such as `3.0`.
fn parse_credit(raw: &str) -> i32 {
    raw.parse::<i32>()
        .ok()
        .or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && v.fract() == 0.0)
                .map(|v| v as i32)
        })
        .unwrap_or(0)
}

fn course_from_row(
    row: &Row<'_>,
    year: i32,
    semester: Semester,
) -> Result<NewCourse, TypeConstraintError> {
    let college = row.optional(COL_COLLEGE);
    let academic_course = row.optional(COL_ACADEMIC_COURSE);

    let department = non_blank(&row.get(COL_DEPARTMENT).replace("null", "")).or(college.clone());

    let academic_year = if row.get(COL_ACADEMIC_COURSE) == UNDERGRADUATE {
        row.optional(COL_ACADEMIC_YEAR)
    } else {
        academic_course.clone()
    };

    let title = row.get(COL_COURSE_TITLE);
    let subtitle = row.get(COL_COURSE_SUBTITLE);
    let course_title = if subtitle.is_empty() {
        title.to_string()
    } else {
        format!("{title} ({subtitle})")
    };

    let times: Vec<&str> = row.get(COL_CLASS_TIME).split('/').collect();
    let locations: Vec<&str> = row.get(COL_LOCATION).split('/').collect();

    Ok(NewCourse {
        year,
        semester,
        classification: row.optional(COL_CLASSIFICATION),
        college,
        department,
        academic_course,
        academic_year,
        course_number: CourseNumber::new(row.get(COL_COURSE_NUMBER))?,
        lecture_number: LectureNumber::new(row.get(COL_LECTURE_NUMBER))?,
        course_title,
        credit: Credit::new(parse_credit(row.get(COL_CREDIT))).unwrap_or_default(),
        instructor: row.optional(COL_INSTRUCTOR),
        class_times: Some(parse_class_times(&times, &locations)),
    })
}

/// Builds course drafts from a fused grid.
///
/// Rows that cannot be turned into a course are logged and skipped.
pub fn courses_from_grid(
    grid: &[Vec<String>],
    year: i32,
    semester: Semester,
) -> Result<Vec<NewCourse>, SugangError> {
    let header = grid.get(HEADER_ROW).ok_or(SugangError::MissingHeader)?;
    let columns = column_index(header);

    for required in [COL_COURSE_NUMBER, COL_LECTURE_NUMBER] {
        if !columns.contains_key(required) {
            log::error!("Course sheet has no `{required}` column");
        }
    }

    let mut courses = Vec::new();
    for (idx, cells) in grid.iter().enumerate().skip(HEADER_ROW + 1) {
        let row = Row {
            cells,
            columns: &columns,
        };
        match course_from_row(&row, year, semester) {
            Ok(course) => courses.push(course),
            Err(e) => log::warn!("Skipping course sheet row {idx}: {e}"),
        }
    }

    Ok(courses)
}

/// Reads both exports and produces the course drafts for one term.
pub fn courses_from_exports(
    korean: &[u8],
    english: &[u8],
    year: i32,
    semester: Semester,
) -> Result<Vec<NewCourse>, SugangError> {
    let grid = fuse_grids(read_grid(korean)?, read_grid(english)?);
    courses_from_grid(&grid, year, semester)
}
