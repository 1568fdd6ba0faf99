use actix_web::{HttpRequest, HttpResponse, delete, get, post, web};
use tracing::info;
use uuid::Uuid;

use crate::application::post_service::EditOutcome;
use crate::domain::error::DomainError;
use crate::domain::post::PostDraft;
use crate::domain::user::Author;
use crate::presentation::dto::{IndexResponse, PageQuery, PostDetailResponse, PostFormResponse};
use crate::presentation::forms::{CommentForm, FieldError, PostForm};
use crate::presentation::handlers::{Auth, Comments, Groups, Posts};
use crate::presentation::utils::{
    AuthenticatedUser, post_detail_url, profile_url, redirect, request_id,
};

#[get("/posts")]
pub async fn index(posts: Posts, query: PageQuery) -> Result<HttpResponse, DomainError> {
    let page_obj = posts.index(query.page_number()).await?;

    Ok(HttpResponse::Ok().json(IndexResponse { page_obj }))
}

#[get("/posts/{post_id}")]
pub async fn post_detail(
    posts: Posts,
    auth: Auth,
    comments: Comments,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let post = posts.get_post(path.into_inner()).await?;
    let author = auth.get_user(post.author_id).await?;
    let author_posts_count = posts.count_by_author(author.id).await?;
    let comments = comments.comments_for_post(post.id).await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post,
        author: Author::from(&author),
        author_posts_count,
        comments,
    }))
}

#[get("/create")]
pub async fn post_create_form(
    _user: AuthenticatedUser,
    groups: Groups,
) -> Result<HttpResponse, DomainError> {
    form_response(&groups, false, PostForm::default(), Vec::new()).await
}

#[post("/create")]
pub async fn post_create(
    req: HttpRequest,
    user: AuthenticatedUser,
    posts: Posts,
    groups: Groups,
    payload: Option<web::Json<PostForm>>,
) -> Result<HttpResponse, DomainError> {
    let form = payload.map(web::Json::into_inner).unwrap_or_default();
    let draft = match clean_post_form(&groups, &form).await? {
        Ok(draft) => draft,
        Err(errors) => return form_response(&groups, false, form, errors).await,
    };

    let post = posts.create_post(user.id, draft).await?;

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        post_id = %post.id,
        "post created"
    );

    Ok(redirect(profile_url(&user.username)))
}

#[get("/posts/{post_id}/edit")]
pub async fn post_edit_form(
    user: AuthenticatedUser,
    posts: Posts,
    groups: Groups,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let post = posts.get_post(path.into_inner()).await?;
    if !post.is_authored_by(user.id) {
        return Ok(redirect(post_detail_url(post.id)));
    }

    form_response(&groups, true, PostForm::from(&post), Vec::new()).await
}

#[post("/posts/{post_id}/edit")]
pub async fn post_edit(
    req: HttpRequest,
    user: AuthenticatedUser,
    posts: Posts,
    groups: Groups,
    path: web::Path<Uuid>,
    payload: Option<web::Json<PostForm>>,
) -> Result<HttpResponse, DomainError> {
    let post = posts.get_post(path.into_inner()).await?;
    if !post.is_authored_by(user.id) {
        return Ok(redirect(post_detail_url(post.id)));
    }

    let form = payload.map(web::Json::into_inner).unwrap_or_default();
    let draft = match clean_post_form(&groups, &form).await? {
        Ok(draft) => draft,
        Err(errors) => return form_response(&groups, true, form, errors).await,
    };

    if let EditOutcome::Updated(post) = posts.edit_post(user.id, post.id, draft).await? {
        info!(
            request_id = %request_id(&req),
            username = %user.username,
            post_id = %post.id,
            "post updated"
        );
    }

    Ok(redirect(post_detail_url(post.id)))
}

#[delete("/posts/{post_id}")]
pub async fn post_delete(
    req: HttpRequest,
    user: AuthenticatedUser,
    posts: Posts,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    posts.delete_post(user.id, post_id).await?;

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        post_id = %post_id,
        "post deleted"
    );

    Ok(HttpResponse::NoContent().finish())
}

#[post("/posts/{post_id}/comment")]
pub async fn add_comment(
    req: HttpRequest,
    user: AuthenticatedUser,
    posts: Posts,
    comments: Comments,
    path: web::Path<Uuid>,
    payload: Option<web::Json<CommentForm>>,
) -> Result<HttpResponse, DomainError> {
    let post = posts.get_post(path.into_inner()).await?;
    let form = payload.map(web::Json::into_inner).unwrap_or_default();

    if let Some(comment) = comments.add_comment(post.id, user.id, &form.text).await? {
        info!(
            request_id = %request_id(&req),
            username = %user.username,
            post_id = %post.id,
            comment_id = %comment.id,
            "comment added"
        );
    }

    Ok(redirect(post_detail_url(post.id)))
}

async fn clean_post_form(
    groups: &Groups,
    form: &PostForm,
) -> Result<Result<PostDraft, Vec<FieldError>>, DomainError> {
    let group_known = match form.group_id() {
        Some(group_id) => groups.exists(group_id).await?,
        None => true,
    };
    Ok(form.clean(group_known))
}

async fn form_response(
    groups: &Groups,
    is_edit: bool,
    form: PostForm,
    errors: Vec<FieldError>,
) -> Result<HttpResponse, DomainError> {
    let groups = groups.list().await?;
    Ok(HttpResponse::Ok().json(PostFormResponse {
        is_edit,
        form,
        errors,
        groups,
    }))
}
