use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpResponse, HttpServer, Responder, Scope, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::application::auth_service::AuthService;
use crate::application::comment_service::CommentService;
use crate::application::follow_service::FollowService;
use crate::application::group_service::GroupService;
use crate::application::post_service::PostService;
use crate::data::comment_repository::CommentRepository;
use crate::data::follow_repository::FollowRepository;
use crate::data::group_repository::GroupRepository;
use crate::data::post_repository::PostRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::pagination::Paginator;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::security::JwtKeys;
use crate::presentation::errors::error_pages;
use crate::presentation::handlers::{self, Auth, Comments, Follows, Groups, Posts};
use crate::presentation::middleware::{IdentityMiddleware, RequestIdMiddleware, TimingMiddleware};

pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub follows: Arc<dyn FollowRepository>,
}

/// Application services shared by every worker.
#[derive(Clone)]
pub struct Services {
    pub auth: Auth,
    pub posts: Posts,
    pub groups: Groups,
    pub comments: Comments,
    pub follows: Follows,
}

impl Services {
    pub fn new(
        repos: Repositories,
        keys: JwtKeys,
        paginator: Paginator,
        index_cache_ttl: Duration,
    ) -> Self {
        Self {
            auth: web::Data::new(AuthService::new(repos.users, keys)),
            posts: web::Data::new(PostService::new(
                Arc::clone(&repos.posts),
                paginator,
                index_cache_ttl,
            )),
            groups: web::Data::new(GroupService::new(repos.groups)),
            comments: web::Data::new(CommentService::new(repos.comments)),
            follows: web::Data::new(FollowService::new(repos.follows, repos.posts, paginator)),
        }
    }

    /// Registers the services and every `/api` route.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.auth.clone())
            .app_data(self.posts.clone())
            .app_data(self.groups.clone())
            .app_data(self.comments.clone())
            .app_data(self.follows.clone())
            .service(api());
    }
}

fn api() -> Scope {
    web::scope("/api")
        .route("/health", web::get().to(health))
        .service(handlers::auth::scope())
        .service(handlers::post::index)
        .service(handlers::post::post_create_form)
        .service(handlers::post::post_create)
        .service(handlers::post::post_detail)
        .service(handlers::post::post_delete)
        .service(handlers::post::post_edit_form)
        .service(handlers::post::post_edit)
        .service(handlers::post::add_comment)
        .service(handlers::group::group_posts)
        .service(handlers::group::list_groups)
        .service(handlers::group::create_group)
        .service(handlers::follow::follow_index)
        .service(handlers::follow::profile)
        .service(handlers::follow::profile_follow)
        .service(handlers::follow::profile_unfollow)
}

pub async fn start_rest_server(config: AppConfig, services: Services) -> anyhow::Result<()> {
    let bind_address = (config.host.clone(), config.port);

    info!(
        host = %bind_address.0,
        port = bind_address.1,
        "HTTP server starting"
    );

    HttpServer::new(move || {
        let cors = build_cors(&config);

        App::new()
            .wrap(IdentityMiddleware)
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(Logger::default())
            .wrap(error_pages())
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Permissions-Policy", "geolocation=()"))
                    .add(("Cross-Origin-Opener-Policy", "same-origin")),
            )
            .wrap(cors)
            .configure(|cfg| services.configure(cfg))
    })
    .bind(bind_address)?
    .run()
    .await
    .map_err(anyhow::Error::new)?;

    info!("HTTP server stopped");
    Ok(())
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::AUTHORIZATION,
        ])
        .supports_credentials()
        .max_age(3600);

    for origin in &config.cors_origins {
        cors = if origin == "*" {
            cors.allow_any_origin()
        } else {
            cors.allowed_origin(origin)
        };
    }

    cors
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}
