//! Static error documents for 404, 403 and 500.
//!
//! They replace whatever body the failing handler (or the router) produced,
//! so every route answers these statuses the same way.

use actix_web::Result;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::{CONTENT_TYPE, HeaderValue};
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};
use serde_json::json;
use tracing::error;

pub fn error_pages<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new()
        .handler(StatusCode::NOT_FOUND, page_not_found)
        .handler(StatusCode::FORBIDDEN, permission_denied)
        .handler(StatusCode::INTERNAL_SERVER_ERROR, server_error)
}

fn page_not_found<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    let path = res.request().path().to_owned();
    render(
        res,
        json!({ "error": "page not found", "status": 404, "path": path }),
    )
}

fn permission_denied<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    render(res, json!({ "error": "forbidden", "status": 403 }))
}

fn server_error<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    error!(path = %res.request().path(), "internal server error");
    render(res, json!({ "error": "internal server error", "status": 500 }))
}

fn render<B>(res: ServiceResponse<B>, body: serde_json::Value) -> Result<ErrorHandlerResponse<B>> {
    let (req, mut res) = res.into_parts();
    res.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let res = res.set_body(body.to_string());
    let res = ServiceResponse::new(req, res)
        .map_into_boxed_body()
        .map_into_right_body();
    Ok(ErrorHandlerResponse::Response(res))
}
