use actix_web::{HttpRequest, HttpResponse, Scope, post, web};
use tracing::info;

use crate::domain::error::DomainError;
use crate::infrastructure::security::TOKEN_TTL_SECS;
use crate::presentation::dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::presentation::handlers::Auth;
use crate::presentation::utils::request_id;

pub fn scope() -> Scope {
    web::scope("/auth").service(register).service(login)
}

#[post("/register")]
async fn register(
    req: HttpRequest,
    service: Auth,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, DomainError> {
    let RegisterRequest {
        username,
        email,
        password,
    } = payload.into_inner();
    let user = service.register(username, email, password.clone()).await?;

    info!(request_id = %request_id(&req), user_id = %user.id, username = %user.username, "user registered");

    let jwt = service.login(&user.username, &password).await?;

    Ok(HttpResponse::Created().json(AuthResponse::bearer(jwt, TOKEN_TTL_SECS)))
}

#[post("/login")]
async fn login(
    req: HttpRequest,
    service: Auth,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, DomainError> {
    let jwt = service.login(&payload.username, &payload.password).await?;

    info!(request_id = %request_id(&req), username = %payload.username, "user logged in");

    Ok(HttpResponse::Ok().json(AuthResponse::bearer(jwt, TOKEN_TTL_SECS)))
}
