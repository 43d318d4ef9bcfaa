use crate::auth::AuthenticatedUser;
use crate::domain::timetable::{EnrollOutcome, Timetable};
use crate::domain::types::{
    CourseId, Semester, TimetableId, TimetableName, ensure_year_in_window,
};
use crate::dto::courses::CourseDto;
use crate::dto::timetables::{TimetableDetailDto, TimetableDto};
use crate::forms::timetables::CreateTimetablePayload;
use crate::repository::{
    CourseReader, EnrollWriter, RepositoryError, TimetableReader, TimetableWriter,
};

use super::{ServiceError, ServiceResult, current_year};

fn duplicate_name() -> ServiceError {
    ServiceError::Conflict("a timetable with this name already exists for the term".to_string())
}

/// Loads a timetable and checks that `user` owns it.
fn load_owned_timetable<R>(
    user: &AuthenticatedUser,
    timetable_id: TimetableId,
    repo: &R,
) -> ServiceResult<Timetable>
where
    R: TimetableReader,
{
    let timetable = match repo.get_timetable_by_id(timetable_id) {
        Ok(Some(timetable)) => timetable,
        Ok(None) => {
            return Err(ServiceError::NotFound(format!(
                "timetable {timetable_id} not found"
            )));
        }
        Err(e) => {
            log::error!("Failed to get timetable: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if timetable.user_id != user.user_id {
        return Err(ServiceError::Forbidden(
            "timetable belongs to another user".to_string(),
        ));
    }

    Ok(timetable)
}

fn ensure_name_available<R>(
    user: &AuthenticatedUser,
    year: i32,
    semester: Semester,
    name: &TimetableName,
    repo: &R,
) -> ServiceResult<()>
where
    R: TimetableReader,
{
    match repo.timetable_name_exists(user.user_id, year, semester, name) {
        Ok(false) => Ok(()),
        Ok(true) => Err(duplicate_name()),
        Err(e) => {
            log::error!("Failed to check timetable name: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn create_timetable<R>(
    payload: CreateTimetablePayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<TimetableDto>
where
    R: TimetableReader + TimetableWriter,
{
    ensure_year_in_window(payload.year, current_year())?;
    ensure_name_available(user, payload.year, payload.semester, &payload.name, repo)?;

    let timetable = payload.into_new_timetable(user.user_id);
    match repo.create_timetable(&timetable) {
        Ok(created) => Ok(created.into()),
        Err(RepositoryError::ConstraintViolation(_)) => Err(duplicate_name()),
        Err(e) => {
            log::error!("Failed to create timetable: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn list_timetables<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Vec<TimetableDto>>
where
    R: TimetableReader,
{
    match repo.list_timetables(user.user_id) {
        Ok(timetables) => Ok(timetables.into_iter().map(TimetableDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list timetables: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Renames a timetable. The new name is validated only after the timetable
/// is found and ownership is confirmed.
pub fn rename_timetable<R>(
    timetable_id: TimetableId,
    name: String,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<TimetableDto>
where
    R: TimetableReader + TimetableWriter,
{
    let timetable = load_owned_timetable(user, timetable_id, repo)?;
    let name = TimetableName::new(name)?;

    ensure_name_available(user, timetable.year, timetable.semester, &name, repo)?;

    match repo.rename_timetable(timetable_id, &name) {
        Ok(updated) => Ok(updated.into()),
        Err(RepositoryError::ConstraintViolation(_)) => Err(duplicate_name()),
        Err(e) => {
            log::error!("Failed to rename timetable: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn delete_timetable<R>(
    timetable_id: TimetableId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<()>
where
    R: TimetableReader + TimetableWriter,
{
    load_owned_timetable(user, timetable_id, repo)?;

    match repo.delete_timetable(timetable_id) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete timetable: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn timetable_detail<R>(
    timetable_id: TimetableId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<TimetableDetailDto>
where
    R: TimetableReader + CourseReader,
{
    let timetable = load_owned_timetable(user, timetable_id, repo)?;

    match repo.list_timetable_courses(timetable_id) {
        Ok(courses) => Ok(TimetableDetailDto::new(timetable, courses)),
        Err(e) => {
            log::error!("Failed to list timetable courses: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Adds a course to a timetable and returns the refreshed member list.
///
/// Checks run in a fixed order: timetable exists, caller owns it, course
/// exists, terms match, then membership and overlap inside one transaction.
pub fn add_course<R>(
    timetable_id: TimetableId,
    course_id: CourseId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Vec<CourseDto>>
where
    R: TimetableReader + CourseReader + EnrollWriter,
{
    let timetable = load_owned_timetable(user, timetable_id, repo)?;

    let course = match repo.get_course_by_id(course_id) {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Err(ServiceError::NotFound(format!(
                "course {course_id} not found"
            )));
        }
        Err(e) => {
            log::error!("Failed to get course: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if course.year != timetable.year || course.semester != timetable.semester {
        return Err(ServiceError::Validation(format!(
            "course is offered in {} {} but the timetable is for {} {}",
            course.year, course.semester, timetable.year, timetable.semester
        )));
    }

    match repo.enroll_course(timetable_id, &course) {
        Ok(EnrollOutcome::Enrolled(courses)) => {
            Ok(courses.into_iter().map(CourseDto::from).collect())
        }
        Ok(EnrollOutcome::AlreadyEnrolled) | Err(RepositoryError::ConstraintViolation(_)) => Err(
            ServiceError::Conflict("course is already in the timetable".to_string()),
        ),
        Err(RepositoryError::ForeignKeyViolation(_)) => Err(ServiceError::NotFound(format!(
            "timetable {timetable_id} not found"
        ))),
        Ok(EnrollOutcome::Overlaps(existing)) => Err(ServiceError::Conflict(format!(
            "class time overlaps with {} ({}-{})",
            existing.course_title, existing.course_number, existing.lecture_number
        ))),
        Err(e) => {
            log::error!("Failed to add course to timetable: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn remove_course<R>(
    timetable_id: TimetableId,
    course_id: CourseId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<()>
where
    R: TimetableReader + EnrollWriter,
{
    load_owned_timetable(user, timetable_id, repo)?;

    match repo.remove_enroll(timetable_id, course_id) {
        Ok(0) => Err(ServiceError::Validation(format!(
            "course {course_id} is not in the timetable"
        ))),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to remove course from timetable: {e}");
            Err(ServiceError::Internal)
        }
    }
}
