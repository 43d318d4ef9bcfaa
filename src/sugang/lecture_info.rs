//! Per-lecture detail returned by the registration site's lookup endpoint.

use serde::Deserialize;

use crate::domain::course::NewCourse;
use crate::sugang::class_time::parse_class_times;

const WIRELESS_NOTICE: &str = "(무선랜제공)";
const UNDERGRADUATE: &str = "학사";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LectureInfo {
    #[serde(rename = "ltTime", default)]
    pub lt_time: Option<Vec<String>>,
    #[serde(rename = "ltRoom", default)]
    pub lt_room: Option<Vec<String>>,
    #[serde(rename = "LISTTAB01", default)]
    pub sub_info: Option<LectureSubInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LectureSubInfo {
    #[serde(rename = "sbjtNm", default)]
    pub course_name: Option<String>,
    #[serde(rename = "sbjtSubhNm", default)]
    pub course_sub_name: Option<String>,
    #[serde(rename = "profNm", default)]
    pub professor_name: Option<String>,
    #[serde(rename = "departmentKorNm", default)]
    pub department_kor_name: Option<String>,
    #[serde(rename = "majorKorNm", default)]
    pub major_kor_name: Option<String>,
    #[serde(rename = "cptnCorsFgNm", default)]
    pub academic_course: Option<String>,
    #[serde(rename = "openShyr", default)]
    pub academic_year: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Drops a trailing ` (…)` suffix such as an employee number.
fn strip_professor_suffix(name: &str) -> &str {
    match name.rfind(" (") {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Overlays the lookup result on a draft parsed from the spreadsheet.
///
/// Fields the lookup does not provide keep their spreadsheet values. Class
/// times are only replaced when the lookup yields at least one slot.
pub fn apply_lecture_info(mut course: NewCourse, info: &LectureInfo) -> NewCourse {
    let sub = info.sub_info.clone().unwrap_or_default();

    if let Some(name) = non_empty(&sub.course_name) {
        course.course_title = match non_empty(&sub.course_sub_name) {
            Some(sub_name) => format!("{name} ({sub_name})"),
            None => name.to_string(),
        };
    }

    if let Some(professor) = sub.professor_name.as_deref() {
        course.instructor = Some(strip_professor_suffix(professor).to_string());
    }

    if let (Some(department), Some(major)) = (
        sub.department_kor_name.as_deref(),
        sub.major_kor_name.as_deref(),
    ) {
        course.department = Some(format!("{department}({major})"));
    }

    if let Some(level) = sub.academic_course.as_deref().filter(|c| *c != UNDERGRADUATE) {
        course.academic_year = Some(level.to_string());
    } else if let Some(grade) = sub.academic_year.as_deref() {
        course.academic_year = Some(format!("{grade}학년"));
    }

    let times = info.lt_time.clone().unwrap_or_default();
    let rooms: Vec<String> = info
        .lt_room
        .iter()
        .flatten()
        .map(|room| room.replace(WIRELESS_NOTICE, ""))
        .collect();
    let slots = parse_class_times(&times, &rooms);
    if !slots.is_empty() {
        course.class_times = Some(slots);
    }

    course
}
