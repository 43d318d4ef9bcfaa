use std::time::Duration;

use actix_web::{HttpResponse, Responder, get, post, web};

use crate::domain::types::CourseId;
use crate::dto::courses::FetchCoursesResponse;
use crate::forms::courses::{
    CourseSearchParams, CourseSearchPayload, FetchCoursesParams, FetchCoursesPayload,
};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::course_fetch::fetch_and_save_courses;
use crate::services::courses::{
    get_course as get_course_service, search_courses as search_courses_service,
};
use crate::sugang::SugangClient;

#[get("/courses")]
pub async fn search_courses(
    params: web::Query<CourseSearchParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let payload = match CourseSearchPayload::try_from(params.into_inner()) {
        Ok(payload) => payload,
        Err(e) => return error_response(e.into()),
    };

    match search_courses_service(payload, repo.get_ref()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

#[get("/courses/{course_id}")]
pub async fn get_course(
    course_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Ok(course_id) = CourseId::try_from(course_id.into_inner()) else {
        return error_response(ServiceError::NotFound("course not found".to_string()));
    };

    match get_course_service(course_id, repo.get_ref()) {
        Ok(course) => HttpResponse::Ok().json(course),
        Err(err) => error_response(err),
    }
}

#[post("/courses/fetch")]
pub async fn fetch_courses(
    params: web::Query<FetchCoursesParams>,
    repo: web::Data<DieselRepository>,
    client: web::Data<SugangClient>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let payload = match FetchCoursesPayload::try_from(params.into_inner()) {
        Ok(payload) => payload,
        Err(e) => return error_response(e.into()),
    };
    let FetchCoursesPayload { year, semester } = payload;

    let fetch = fetch_and_save_courses(
        year,
        semester,
        client.get_ref(),
        repo.get_ref(),
        server_config.enrich_concurrency,
    );
    let timeout = Duration::from_secs(server_config.fetch_timeout_secs);

    match tokio::time::timeout(timeout, fetch).await {
        Ok(Ok(count)) => HttpResponse::Ok().json(FetchCoursesResponse {
            message: format!("fetched {count} courses for {year} {semester}"),
            year,
            semester,
            count,
        }),
        Ok(Err(err)) => error_response(err),
        Err(_) => {
            log::error!("Course fetch for {year} {semester} timed out after {timeout:?}");
            error_response(ServiceError::Upstream("course fetch timed out".to_string()))
        }
    }
}
