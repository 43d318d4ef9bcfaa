//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values and numeric constraints are enforced at the
//! boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Earliest year for which the registration site publishes course data.
pub const MIN_COURSE_YEAR: i32 = 2013;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A numeric value required to be non-negative was negative.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A year outside of the supported window.
    #[error("year must be between {min} and {max}")]
    YearOutOfRange { min: i32, max: i32 },
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Checks that `year` lies within `[MIN_COURSE_YEAR, current_year]`.
pub fn ensure_year_in_window(year: i32, current_year: i32) -> Result<i32, TypeConstraintError> {
    if (MIN_COURSE_YEAR..=current_year).contains(&year) {
        Ok(year)
    } else {
        Err(TypeConstraintError::YearOutOfRange {
            min: MIN_COURSE_YEAR,
            max: current_year,
        })
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for i32 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

macro_rules! non_negative_i32_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd,
            Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Constructs a value that must be zero or greater.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value >= 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NegativeNumber($field))
                }
            }

            /// Returns the raw `i32` value.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }
    };
}

id_newtype!(CourseId, "Unique identifier of a catalog course.", "course_id");
id_newtype!(TimetableId, "Unique identifier of a timetable.", "timetable_id");
id_newtype!(EnrollId, "Unique identifier of a timetable membership row.", "enroll_id");
id_newtype!(
    UserId,
    "Identifier of a user issued by the external auth service.",
    "user_id"
);

non_empty_string_newtype!(
    TimetableName,
    "Timetable name enforcing non-blank values.",
    "timetable name"
);
non_empty_string_newtype!(
    CourseNumber,
    "Course number (교과목번호) enforcing non-empty values.",
    "course number"
);
non_empty_string_newtype!(
    LectureNumber,
    "Lecture number (강좌번호) enforcing non-empty values.",
    "lecture number"
);

non_negative_i32_newtype!(Credit, "Number of credits a course is worth.", "credit");

/// Academic term within a year.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub enum Semester {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Semester {
    /// String representation used in persistence and JSON.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "SPRING",
            Self::Summer => "SUMMER",
            Self::Fall => "FALL",
            Self::Winter => "WINTER",
        }
    }

    /// Maps the `N` of a `YYYY-N` term token to a semester.
    pub const fn from_term_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::Spring),
            2 => Some(Self::Summer),
            3 => Some(Self::Fall),
            4 => Some(Self::Winter),
            _ => None,
        }
    }
}

impl Display for Semester {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Semester {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "SPRING" => Ok(Self::Spring),
            "SUMMER" => Ok(Self::Summer),
            "FALL" => Ok(Self::Fall),
            "WINTER" => Ok(Self::Winter),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "semester: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for Semester {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Semester> for String {
    fn from(value: Semester) -> Self {
        value.as_str().to_string()
    }
}

/// Day of a weekly class meeting.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Sort weight; Monday sorts first.
    pub const fn weight(self) -> u8 {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
            Self::Sunday => 6,
        }
    }

    /// Parses the single-glyph Korean day names used by the registration site.
    pub fn from_korean(glyph: &str) -> Option<Self> {
        match glyph {
            "월" => Some(Self::Monday),
            "화" => Some(Self::Tuesday),
            "수" => Some(Self::Wednesday),
            "목" => Some(Self::Thursday),
            "금" => Some(Self::Friday),
            "토" => Some(Self::Saturday),
            "일" => Some(Self::Sunday),
            _ => None,
        }
    }
}

impl PartialOrd for DayOfWeek {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DayOfWeek {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.weight().cmp(&other.weight())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_timetable_names() {
        let value = TimetableName::new("  2025-2 시간표  ").unwrap();
        assert_eq!(value.as_str(), "2025-2 시간표");
    }

    #[test]
    fn rejects_blank_timetable_names() {
        let err = TimetableName::new("   ").unwrap_err();
        assert_eq!(err, TypeConstraintError::EmptyString("timetable name"));
    }

    #[test]
    fn rejects_non_positive_ids() {
        let err = CourseId::new(0).unwrap_err();
        assert_eq!(err, TypeConstraintError::NonPositiveId("course_id"));
    }

    #[test]
    fn credit_allows_zero_but_not_negative() {
        assert_eq!(Credit::new(0).unwrap().get(), 0);
        assert_eq!(
            Credit::new(-1).unwrap_err(),
            TypeConstraintError::NegativeNumber("credit")
        );
    }

    #[test]
    fn year_window_is_inclusive() {
        assert_eq!(ensure_year_in_window(2013, 2025), Ok(2013));
        assert_eq!(ensure_year_in_window(2025, 2025), Ok(2025));
        assert!(ensure_year_in_window(2012, 2025).is_err());
        assert!(ensure_year_in_window(2026, 2025).is_err());
    }

    #[test]
    fn semester_parses_case_insensitively() {
        assert_eq!(Semester::try_from("fall").unwrap(), Semester::Fall);
        assert_eq!(Semester::try_from("WINTER").unwrap(), Semester::Winter);
        assert!(Semester::try_from("autumn").is_err());
    }

    #[test]
    fn semester_serializes_as_upper_case_name() {
        let value = serde_json::to_value(Semester::Summer).unwrap();
        assert_eq!(value, serde_json::json!("SUMMER"));
        let parsed: Semester = serde_json::from_value(serde_json::json!("spring")).unwrap();
        assert_eq!(parsed, Semester::Spring);
    }

    #[test]
    fn term_index_maps_to_semesters() {
        assert_eq!(Semester::from_term_index(1), Some(Semester::Spring));
        assert_eq!(Semester::from_term_index(4), Some(Semester::Winter));
        assert_eq!(Semester::from_term_index(5), None);
    }

    #[test]
    fn days_order_by_weekday() {
        assert!(DayOfWeek::Monday < DayOfWeek::Tuesday);
        assert!(DayOfWeek::Saturday < DayOfWeek::Sunday);
        assert_eq!(DayOfWeek::from_korean("목"), Some(DayOfWeek::Thursday));
        assert_eq!(DayOfWeek::from_korean("X"), None);
    }
}
