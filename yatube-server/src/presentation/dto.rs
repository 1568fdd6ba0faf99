use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::comment::Comment;
use crate::domain::group::Group;
use crate::domain::pagination::{Page, PageNumber};
use crate::domain::post::Post;
use crate::domain::user::Author;
use crate::presentation::forms::{FieldError, PostForm};

// ======================= AUTH =======================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

impl AuthResponse {
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            expires_in,
            token_type: "Bearer".to_string(),
        }
    }
}

// ======================= LISTINGS =======================

/// The `page` query parameter. A repeated parameter keeps its last value
/// and a query string that cannot be decoded counts as no parameter, so
/// listings never reject a request over it.
#[derive(Debug, Default)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn from_query_string(query: &str) -> Self {
        let pairs = web::Query::<Vec<(String, String)>>::from_query(query)
            .map(web::Query::into_inner)
            .unwrap_or_default();
        let page = pairs
            .into_iter()
            .rev()
            .find(|(key, _)| key == "page")
            .map(|(_, value)| value);
        Self { page }
    }

    pub fn page_number(&self) -> PageNumber {
        PageNumber::parse(self.page.as_deref())
    }
}

impl FromRequest for PageQuery {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_query_string(req.query_string())))
    }
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub page_obj: Page<Post>,
}

#[derive(Debug, Serialize)]
pub struct GroupPostsResponse {
    pub group: Group,
    pub page_obj: Page<Post>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub author: Author,
    pub posts_count: usize,
    pub followers_count: usize,
    /// Whether the viewer follows this author; false for anonymous viewers.
    pub following: bool,
    pub page_obj: Page<Post>,
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub following: Vec<Uuid>,
    pub page_obj: Page<Post>,
}

// ======================= POSTS =======================

#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub post: Post,
    pub author: Author,
    pub author_posts_count: usize,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Serialize)]
pub struct PostFormResponse {
    pub is_edit: bool,
    pub form: PostForm,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
    pub groups: Vec<Group>,
}

// ======================= GROUPS =======================

#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}
