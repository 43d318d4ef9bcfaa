use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};

use crate::auth::AuthenticatedUser;
use crate::domain::types::{CourseId, TimetableId};
use crate::forms::timetables::{CreateTimetableForm, CreateTimetablePayload, UpdateTimetableForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::timetables::{
    add_course as add_course_service, create_timetable as create_timetable_service,
    delete_timetable as delete_timetable_service, list_timetables as list_timetables_service,
    remove_course as remove_course_service, rename_timetable as rename_timetable_service,
    timetable_detail as timetable_detail_service,
};

fn timetable_id(raw: i32) -> Result<TimetableId, ServiceError> {
    TimetableId::try_from(raw).map_err(|_| ServiceError::NotFound("timetable not found".to_string()))
}

fn course_id(raw: i32) -> Result<CourseId, ServiceError> {
    CourseId::try_from(raw).map_err(|_| ServiceError::NotFound("course not found".to_string()))
}

#[post("/timetables")]
pub async fn create_timetable(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateTimetableForm>,
) -> impl Responder {
    let payload: CreateTimetablePayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match create_timetable_service(payload, &user, repo.get_ref()) {
        Ok(timetable) => HttpResponse::Created().json(timetable),
        Err(err) => error_response(err),
    }
}

#[get("/timetables")]
pub async fn list_timetables(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match list_timetables_service(&user, repo.get_ref()) {
        Ok(timetables) => HttpResponse::Ok().json(timetables),
        Err(err) => error_response(err),
    }
}

#[get("/timetables/{timetable_id}")]
pub async fn timetable_detail(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = timetable_id(path.into_inner())
        .and_then(|id| timetable_detail_service(id, &user, repo.get_ref()));

    match result {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(err) => error_response(err),
    }
}

#[patch("/timetables/{timetable_id}")]
pub async fn rename_timetable(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateTimetableForm>,
) -> impl Responder {
    let result = timetable_id(path.into_inner())
        .and_then(|id| rename_timetable_service(id, form.name, &user, repo.get_ref()));

    match result {
        Ok(timetable) => HttpResponse::Ok().json(timetable),
        Err(err) => error_response(err),
    }
}

#[delete("/timetables/{timetable_id}")]
pub async fn delete_timetable(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = timetable_id(path.into_inner())
        .and_then(|id| delete_timetable_service(id, &user, repo.get_ref()));

    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

#[post("/timetables/{timetable_id}/courses/{course_id}")]
pub async fn add_course(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (raw_timetable_id, raw_course_id) = path.into_inner();
    let result = timetable_id(raw_timetable_id).and_then(|tid| {
        let cid = course_id(raw_course_id)?;
        add_course_service(tid, cid, &user, repo.get_ref())
    });

    match result {
        Ok(courses) => HttpResponse::Ok().json(courses),
        Err(err) => error_response(err),
    }
}

#[delete("/timetables/{timetable_id}/courses/{course_id}")]
pub async fn remove_course(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (raw_timetable_id, raw_course_id) = path.into_inner();
    let result = timetable_id(raw_timetable_id).and_then(|tid| {
        let cid = course_id(raw_course_id)?;
        remove_course_service(tid, cid, &user, repo.get_ref())
    });

    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}
