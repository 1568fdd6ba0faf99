use actix_web::{HttpRequest, HttpResponse, get, post, web};
use tracing::info;

use crate::domain::error::DomainError;
use crate::presentation::dto::{CreateGroupRequest, GroupPostsResponse, PageQuery};
use crate::presentation::handlers::{Groups, Posts};
use crate::presentation::utils::{AuthenticatedUser, request_id};

#[get("/group/{slug}")]
pub async fn group_posts(
    groups: Groups,
    posts: Posts,
    path: web::Path<String>,
    query: PageQuery,
) -> Result<HttpResponse, DomainError> {
    let group = groups.get_by_slug(&path.into_inner()).await?;
    let page_obj = posts.group_posts(group.id, query.page_number()).await?;

    Ok(HttpResponse::Ok().json(GroupPostsResponse { group, page_obj }))
}

#[get("/groups")]
pub async fn list_groups(groups: Groups) -> Result<HttpResponse, DomainError> {
    Ok(HttpResponse::Ok().json(groups.list().await?))
}

#[post("/groups")]
pub async fn create_group(
    req: HttpRequest,
    user: AuthenticatedUser,
    groups: Groups,
    payload: web::Json<CreateGroupRequest>,
) -> Result<HttpResponse, DomainError> {
    let CreateGroupRequest {
        title,
        slug,
        description,
    } = payload.into_inner();
    let group = groups.create_group(title, slug, description).await?;

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        slug = %group.slug,
        "group created"
    );

    Ok(HttpResponse::Created().json(group))
}
