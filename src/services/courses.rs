use crate::domain::types::{CourseId, ensure_year_in_window};
use crate::dto::courses::{CourseDto, CourseSearchResponse};
use crate::forms::courses::CourseSearchPayload;
use crate::repository::{CourseReader, CourseSearchQuery};

use super::{ServiceError, ServiceResult, current_year};

/// Keyset-paginated search within one term, newest courses first.
pub fn search_courses<R>(payload: CourseSearchPayload, repo: &R) -> ServiceResult<CourseSearchResponse>
where
    R: CourseReader,
{
    ensure_year_in_window(payload.year, current_year())?;

    let limit = payload.limit;
    // One extra row tells whether another page exists.
    let mut query = CourseSearchQuery::new(payload.year, payload.semester).limit(limit + 1);
    if let Some(keyword) = payload.keyword {
        query = query.keyword(keyword);
    }
    if let Some(next_id) = payload.next_id {
        query = query.before(next_id);
    }

    let mut courses = repo.search_courses(&query).map_err(|e| {
        log::error!("Failed to search courses: {e}");
        ServiceError::Internal
    })?;

    let has_next = courses.len() > limit;
    courses.truncate(limit);
    let next_id = if has_next {
        courses.last().map(|course| course.id.get())
    } else {
        None
    };

    Ok(CourseSearchResponse {
        data: courses.into_iter().map(CourseDto::from).collect(),
        next_id,
        has_next,
    })
}

pub fn get_course<R>(course_id: CourseId, repo: &R) -> ServiceResult<CourseDto>
where
    R: CourseReader,
{
    match repo.get_course_by_id(course_id) {
        Ok(Some(course)) => Ok(course.into()),
        Ok(None) => Err(ServiceError::NotFound(format!(
            "course {course_id} not found"
        ))),
        Err(e) => {
            log::error!("Failed to get course: {e}");
            Err(ServiceError::Internal)
        }
    }
}
