use serde::{Deserialize, Serialize};

use crate::domain::types::{CourseId, CourseNumber, Credit, DayOfWeek, LectureNumber, Semester};

/// One weekly meeting slot of a course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClassPlaceAndTime {
    pub day: DayOfWeek,
    /// Room labels; several rooms sharing a slot are joined by `/`.
    pub place: String,
    /// Minutes since midnight.
    pub start_minute: i32,
    /// Minutes since midnight, always after `start_minute`.
    pub end_minute: i32,
}

impl ClassPlaceAndTime {
    /// Two slots conflict when they share a day and their half-open intervals
    /// intersect. Touching endpoints do not conflict.
    pub fn overlaps(&self, other: &ClassPlaceAndTime) -> bool {
        self.day == other.day
            && self.end_minute > other.start_minute
            && other.end_minute > self.start_minute
    }
}

/// A scheduled course offering from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: CourseId,
    pub year: i32,
    pub semester: Semester,
    pub classification: Option<String>,
    pub college: Option<String>,
    pub department: Option<String>,
    pub academic_course: Option<String>,
    pub academic_year: Option<String>,
    pub course_number: CourseNumber,
    pub lecture_number: LectureNumber,
    pub course_title: String,
    pub credit: Credit,
    pub instructor: Option<String>,
    /// `None` means the schedule is not known yet; an empty list means the
    /// course has no fixed meeting time.
    pub class_times: Option<Vec<ClassPlaceAndTime>>,
}

impl Course {
    /// Returns `true` when any slot of `self` overlaps any slot of `other`.
    ///
    /// Courses without schedule information never conflict.
    pub fn conflicts_with(&self, other: &Course) -> bool {
        let (Some(mine), Some(theirs)) = (&self.class_times, &other.class_times) else {
            return false;
        };

        mine.iter()
            .any(|slot| theirs.iter().any(|existing| slot.overlaps(existing)))
    }

    /// Finds the first member of `existing` whose schedule overlaps `self`.
    pub fn find_conflict<'a>(&self, existing: &'a [Course]) -> Option<&'a Course> {
        existing.iter().find(|course| self.conflicts_with(course))
    }
}

/// Catalog record produced by ingestion, before an id is assigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCourse {
    pub year: i32,
    pub semester: Semester,
    pub classification: Option<String>,
    pub college: Option<String>,
    pub department: Option<String>,
    pub academic_course: Option<String>,
    pub academic_year: Option<String>,
    pub course_number: CourseNumber,
    pub lecture_number: LectureNumber,
    pub course_title: String,
    pub credit: Credit,
    pub instructor: Option<String>,
    pub class_times: Option<Vec<ClassPlaceAndTime>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(day: DayOfWeek, start_minute: i32, end_minute: i32) -> ClassPlaceAndTime {
        ClassPlaceAndTime {
            day,
            place: "301-101".to_string(),
            start_minute,
            end_minute,
        }
    }

    fn course(id: i32, class_times: Option<Vec<ClassPlaceAndTime>>) -> Course {
        Course {
            id: CourseId::new(id).unwrap(),
            year: 2025,
            semester: Semester::Fall,
            classification: None,
            college: None,
            department: None,
            academic_course: None,
            academic_year: None,
            course_number: CourseNumber::new("4190.310").unwrap(),
            lecture_number: LectureNumber::new(format!("{id:03}")).unwrap(),
            course_title: "운영체제".to_string(),
            credit: Credit::new(3).unwrap(),
            instructor: None,
            class_times,
        }
    }

    #[test]
    fn overlapping_slots_on_same_day_conflict() {
        let a = slot(DayOfWeek::Monday, 540, 630);
        let b = slot(DayOfWeek::Monday, 600, 690);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn touching_endpoints_do_not_conflict() {
        let a = slot(DayOfWeek::Monday, 540, 630);
        let b = slot(DayOfWeek::Monday, 630, 720);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn different_days_do_not_conflict() {
        let a = slot(DayOfWeek::Monday, 540, 630);
        let b = slot(DayOfWeek::Wednesday, 540, 630);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn unknown_schedule_never_conflicts() {
        let known = course(1, Some(vec![slot(DayOfWeek::Tuesday, 600, 700)]));
        let unknown = course(2, None);
        assert!(!known.conflicts_with(&unknown));
        assert!(!unknown.conflicts_with(&known));
    }

    #[test]
    fn conflict_check_is_symmetric() {
        let a = course(
            1,
            Some(vec![
                slot(DayOfWeek::Monday, 540, 615),
                slot(DayOfWeek::Wednesday, 540, 615),
            ]),
        );
        let b = course(2, Some(vec![slot(DayOfWeek::Wednesday, 600, 660)]));
        let c = course(3, Some(vec![slot(DayOfWeek::Friday, 600, 660)]));

        assert_eq!(a.conflicts_with(&b), b.conflicts_with(&a));
        assert!(a.conflicts_with(&b));
        assert_eq!(a.conflicts_with(&c), c.conflicts_with(&a));
        assert!(!a.conflicts_with(&c));
    }

    #[test]
    fn find_conflict_returns_first_overlapping_member() {
        let existing = vec![
            course(1, Some(vec![slot(DayOfWeek::Monday, 540, 630)])),
            course(2, Some(vec![slot(DayOfWeek::Tuesday, 540, 630)])),
        ];
        let candidate = course(3, Some(vec![slot(DayOfWeek::Tuesday, 600, 660)]));

        let conflict = candidate.find_conflict(&existing).unwrap();
        assert_eq!(conflict.id, 2);
    }

    #[test]
    fn serializes_class_times_in_camel_case() {
        let value = serde_json::to_value(slot(DayOfWeek::Friday, 780, 870)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "day": "FRIDAY",
                "place": "301-101",
                "startMinute": 780,
                "endMinute": 870,
            })
        );
    }
}
