mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use std::sync::Arc;

use anyhow::Context;

use data::comment_repository::PostgresCommentRepository;
use data::follow_repository::PostgresFollowRepository;
use data::group_repository::PostgresGroupRepository;
use data::post_repository::PostgresPostRepository;
use data::user_repository::PostgresUserRepository;
use domain::pagination::Paginator;
use infrastructure::config::AppConfig;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use infrastructure::security::JwtKeys;
use server::{Repositories, Services, start_rest_server};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let pool = create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let repos = Repositories {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        posts: Arc::new(PostgresPostRepository::new(pool.clone())),
        groups: Arc::new(PostgresGroupRepository::new(pool.clone())),
        comments: Arc::new(PostgresCommentRepository::new(pool.clone())),
        follows: Arc::new(PostgresFollowRepository::new(pool)),
    };

    let services = Services::new(
        repos,
        JwtKeys::new(config.jwt_secret.clone()),
        Paginator::new(config.posts_per_page),
        config.index_cache_ttl(),
    );

    start_rest_server(config, services).await
}
