use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse, error::ErrorUnauthorized,
};
use futures_util::future::{Ready, ready};
use uuid::Uuid;

use crate::application::auth_service::AuthService;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::infrastructure::security::JwtKeys;
use crate::presentation::middleware::RequestId;

pub const FOLLOW_INDEX_URL: &str = "/api/follow";

pub fn profile_url(username: &str) -> String {
    format!("/api/profile/{username}")
}

pub fn post_detail_url(post_id: Uuid) -> String {
    format!("/api/posts/{post_id}")
}

pub fn redirect(location: impl AsRef<str>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.as_ref()))
        .finish()
}

pub fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}

/// Identity resolved by the identity middleware.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub username: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(ErrorUnauthorized("authentication required"))),
        }
    }
}

pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// A token for a user that no longer exists is a 401; storage failures
/// keep their own status.
pub async fn extract_user_from_token<R: UserRepository + ?Sized>(
    token: &str,
    keys: &JwtKeys,
    auth_service: &AuthService<R>,
) -> Result<AuthenticatedUser, Error> {
    let claims = keys
        .verify_token(token)
        .map_err(|_| ErrorUnauthorized("invalid token"))?;
    let user_id = claims.user_id().ok_or_else(|| ErrorUnauthorized("invalid token"))?;

    let user = auth_service.get_user(user_id).await.map_err(|err| match err {
        DomainError::UserNotFound(_) => ErrorUnauthorized("user not found"),
        other => Error::from(other),
    })?;

    Ok(AuthenticatedUser {
        id: user.id,
        username: user.username,
    })
}
