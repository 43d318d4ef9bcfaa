use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{CourseId, Semester, TypeConstraintError};

pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Query string of `GET /courses`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CourseSearchParams {
    pub year: i32,
    pub semester: String,
    pub keyword: Option<String>,
    pub next_id: Option<i32>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseSearchPayload {
    pub year: i32,
    pub semester: Semester,
    pub keyword: Option<String>,
    pub next_id: Option<CourseId>,
    pub limit: usize,
}

#[derive(Debug, Error)]
pub enum CourseSearchFormError {
    #[error("Course search parameters are invalid: {0}")]
    Validation(String),
    #[error("Course search parameters contain invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CourseSearchFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CourseSearchFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CourseSearchParams> for CourseSearchPayload {
    type Error = CourseSearchFormError;

    fn try_from(value: CourseSearchParams) -> Result<Self, Self::Error> {
        value.validate()?;

        let keyword = value
            .keyword
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(Self {
            year: value.year,
            semester: Semester::try_from(value.semester)?,
            keyword,
            next_id: value.next_id.map(CourseId::new).transpose()?,
            limit: value
                .limit
                .map_or(DEFAULT_SEARCH_LIMIT, |limit| limit as usize),
        })
    }
}

/// Query string of `POST /courses/fetch`.
///
/// Either `semester` is a `YYYY-N` term token, or `year` is given and
/// `semester` names the term.
#[derive(Debug, Deserialize)]
pub struct FetchCoursesParams {
    pub year: Option<i32>,
    pub semester: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchCoursesPayload {
    pub year: i32,
    pub semester: Semester,
}

#[derive(Debug, Error)]
pub enum FetchCoursesFormError {
    #[error("Malformed term token `{0}`, expected YYYY-N with N in 1..=4")]
    MalformedTerm(String),
    #[error("Course fetch parameters contain invalid data: {0}")]
    TypeConstraint(String),
}

impl From<TypeConstraintError> for FetchCoursesFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

static TERM_TOKEN_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([1-4])$"));

/// Parses a `YYYY-N` token. The whole input must match, surrounding
/// whitespace included.
fn parse_term_token(token: &str) -> Option<(i32, Semester)> {
    let re = TERM_TOKEN_RE.as_ref().ok()?;
    let caps = re.captures(token)?;
    let year = caps[1].parse::<i32>().ok()?;
    let semester = Semester::from_term_index(caps[2].parse::<u8>().ok()?)?;
    Some((year, semester))
}

impl TryFrom<FetchCoursesParams> for FetchCoursesPayload {
    type Error = FetchCoursesFormError;

    fn try_from(value: FetchCoursesParams) -> Result<Self, Self::Error> {
        match value.year {
            Some(year) => Ok(Self {
                year,
                semester: Semester::try_from(value.semester)?,
            }),
            None => {
                let (year, semester) = parse_term_token(&value.semester)
                    .ok_or(FetchCoursesFormError::MalformedTerm(value.semester))?;
                Ok(Self { year, semester })
            }
        }
    }
}
