use actix_web::error::InternalError;
use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod courses;
pub mod timetables;

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: String,
}

/// Renders a service error as `{"code", "message"}` with the matching status.
pub fn error_response(err: ServiceError) -> HttpResponse {
    let mut builder = match &err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized(),
        ServiceError::NotFound(_) => HttpResponse::NotFound(),
        ServiceError::Forbidden(_) => HttpResponse::Forbidden(),
        ServiceError::Validation(_) => HttpResponse::BadRequest(),
        ServiceError::Conflict(_) => HttpResponse::Conflict(),
        ServiceError::Upstream(_) | ServiceError::Internal => {
            HttpResponse::InternalServerError()
        }
    };

    builder.json(ErrorBody {
        code: err.code(),
        message: err.to_string(),
    })
}

fn bad_request(message: String) -> actix_web::Error {
    let response = error_response(ServiceError::Validation(message.clone()));
    InternalError::from_response(message, response).into()
}

/// Registers every API route and the JSON error handlers for malformed
/// request bodies, query strings and paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| bad_request(err.to_string())))
        .app_data(
            web::QueryConfig::default().error_handler(|err, _| bad_request(err.to_string())),
        )
        .app_data(web::PathConfig::default().error_handler(|err, _| bad_request(err.to_string())))
        .service(courses::fetch_courses)
        .service(courses::search_courses)
        .service(courses::get_course)
        .service(timetables::create_timetable)
        .service(timetables::list_timetables)
        .service(timetables::timetable_detail)
        .service(timetables::rename_timetable)
        .service(timetables::delete_timetable)
        .service(timetables::add_course)
        .service(timetables::remove_course);
}
