use actix_web::{HttpRequest, HttpResponse, get, route, web};
use tracing::info;

use crate::domain::error::DomainError;
use crate::domain::follow::FollowOutcome;
use crate::domain::user::Author;
use crate::presentation::dto::{FeedResponse, PageQuery, ProfileResponse};
use crate::presentation::handlers::{Auth, Follows, Posts};
use crate::presentation::utils::{AuthenticatedUser, FOLLOW_INDEX_URL, redirect, request_id};

#[get("/profile/{username}")]
pub async fn profile(
    viewer: Option<AuthenticatedUser>,
    auth: Auth,
    posts: Posts,
    follows: Follows,
    path: web::Path<String>,
    query: PageQuery,
) -> Result<HttpResponse, DomainError> {
    let author = auth.get_by_username(&path.into_inner()).await?;
    let page_obj = posts.author_posts(author.id, query.page_number()).await?;
    let following = match viewer {
        Some(viewer) => follows.is_following(viewer.id, author.id).await?,
        None => false,
    };

    Ok(HttpResponse::Ok().json(ProfileResponse {
        author: Author::from(&author),
        posts_count: page_obj.count,
        followers_count: follows.follower_count(author.id).await?,
        following,
        page_obj,
    }))
}

#[get("/follow")]
pub async fn follow_index(
    user: AuthenticatedUser,
    follows: Follows,
    query: PageQuery,
) -> Result<HttpResponse, DomainError> {
    let page_obj = follows.feed(user.id, query.page_number()).await?;
    let following = follows.following_authors(user.id).await?;

    Ok(HttpResponse::Ok().json(FeedResponse {
        following,
        page_obj,
    }))
}

#[route("/profile/{username}/follow", method = "GET", method = "POST")]
pub async fn profile_follow(
    req: HttpRequest,
    user: AuthenticatedUser,
    auth: Auth,
    follows: Follows,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let author = auth.get_by_username(&path.into_inner()).await?;

    if follows.follow(user.id, author.id).await? == FollowOutcome::Created {
        info!(
            request_id = %request_id(&req),
            username = %user.username,
            author = %author.username,
            "author followed"
        );
    }

    Ok(redirect(FOLLOW_INDEX_URL))
}

#[route("/profile/{username}/unfollow", method = "GET", method = "POST")]
pub async fn profile_unfollow(
    req: HttpRequest,
    user: AuthenticatedUser,
    auth: Auth,
    follows: Follows,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let author = auth.get_by_username(&path.into_inner()).await?;

    if follows.unfollow(user.id, author.id).await? {
        info!(
            request_id = %request_id(&req),
            username = %user.username,
            author = %author.username,
            "author unfollowed"
        );
    }

    Ok(redirect(FOLLOW_INDEX_URL))
}
