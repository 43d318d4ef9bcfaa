//! Request extractor for the user identity stored in the session cookie.

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::domain::types::UserId;
use crate::routes::error_response;
use crate::services::ServiceError;

/// The caller's identity as issued by the external auth service.
///
/// Extraction fails with `401` when the session carries no identity or the
/// identity is not a positive numeric user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

impl AuthenticatedUser {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

fn unauthorized() -> actix_web::Error {
    actix_web::error::InternalError::from_response(
        "authentication required",
        error_response(ServiceError::Unauthorized),
    )
    .into()
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let identity = Identity::from_request(req, payload);
        Box::pin(async move {
            let identity = identity.await.map_err(|_| unauthorized())?;
            let id = identity.id().map_err(|_| unauthorized())?;
            let user_id = id
                .parse::<i32>()
                .ok()
                .and_then(|raw| UserId::new(raw).ok())
                .ok_or_else(unauthorized)?;
            Ok(Self::new(user_id))
        })
    }
}
