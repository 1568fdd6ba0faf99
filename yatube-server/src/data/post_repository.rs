use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostDraft, PostFilter};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use tracing::{error, info};
use uuid::Uuid;

const POST_COLUMNS: &str = "SELECT id, author_id, group_id, text, image, pub_date FROM posts";
/// `seq` follows insertion, so equal timestamps list the later post first.
const NEWEST_FIRST: &str = " ORDER BY pub_date DESC, seq DESC";

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: Post) -> Result<Post, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError>;
    /// Updates text, group and image of a post owned by `author_id`.
    /// Returns `None` when no such post belongs to that author.
    async fn update_post(
        &self,
        id: Uuid,
        author_id: Uuid,
        draft: &PostDraft,
    ) -> Result<Option<Post>, DomainError>;
    async fn delete_post(&self, id: Uuid, author_id: Uuid) -> Result<(), DomainError>;
    async fn count(&self, filter: PostFilter) -> Result<usize, DomainError>;
    /// Newest first.
    async fn list(
        &self,
        filter: PostFilter,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Post>, DomainError>;
    /// Every post of one author, newest first.
    async fn posts_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn list_query(filter: PostFilter, limit: usize, offset: usize) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new(POST_COLUMNS);
    push_filter(&mut builder, filter);
    builder
        .push(NEWEST_FIRST)
        .push(" LIMIT ")
        .push_bind(limit as i64)
        .push(" OFFSET ")
        .push_bind(offset as i64);
    builder
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: PostFilter) {
    match filter {
        PostFilter::All => {}
        PostFilter::Group(group_id) => {
            builder.push(" WHERE group_id = ").push_bind(group_id);
        }
        PostFilter::Author(author_id) => {
            builder.push(" WHERE author_id = ").push_bind(author_id);
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: Post) -> Result<Post, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, author_id, group_id, text, image, pub_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id)
        .bind(post.author_id)
        .bind(post.group_id)
        .bind(&post.text)
        .bind(&post.image)
        .bind(post.pub_date)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create post: {}", e);
            DomainError::from(e)
        })?;

        info!(post_id = %post.id, author_id = %post.author_id, "post created");
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, group_id, text, image, pub_date
            FROM posts WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find_by_id {}: {}", id, e);
            DomainError::from(e)
        })
    }

    async fn update_post(
        &self,
        id: Uuid,
        author_id: Uuid,
        draft: &PostDraft,
    ) -> Result<Option<Post>, DomainError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET
                text = $1,
                group_id = $2,
                image = $3
            WHERE id = $4 AND author_id = $5
            RETURNING id, author_id, group_id, text, image, pub_date
            "#,
        )
        .bind(&draft.text)
        .bind(draft.group_id)
        .bind(&draft.image)
        .bind(id)
        .bind(author_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update post {}: {}", id, e);
            DomainError::from(e)
        })?;

        if post.is_some() {
            info!(post_id = %id, "post updated");
        }

        Ok(post)
    }

    async fn delete_post(&self, id: Uuid, author_id: Uuid) -> Result<(), DomainError> {
        let deleted = sqlx::query("DELETE FROM posts WHERE id = $1 AND author_id = $2")
            .bind(id)
            .bind(author_id)
            .execute(&self.pool)
            .await
            .map_err(DomainError::from)?;

        if deleted.rows_affected() == 0 {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
                    .bind(id)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(DomainError::from)?;

            return if exists {
                Err(DomainError::Forbidden)
            } else {
                Err(DomainError::PostNotFound(id))
            };
        }

        info!(post_id = %id, "post deleted");
        Ok(())
    }

    async fn count(&self, filter: PostFilter) -> Result<usize, DomainError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM posts");
        push_filter(&mut builder, filter);

        let row = builder.build().fetch_one(&self.pool).await.map_err(|e| {
            error!("db error while counting posts: {}", e);
            DomainError::from(e)
        })?;
        let count: i64 = row.try_get(0).map_err(DomainError::from)?;

        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn list(
        &self,
        filter: PostFilter,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Post>, DomainError> {
        let mut builder = list_query(filter, limit, offset);
        builder
            .build_query_as::<Post>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("db error while fetching posts: {}", e);
                DomainError::from(e)
            })
    }

    async fn posts_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, DomainError> {
        let mut builder = QueryBuilder::<Postgres>::new(POST_COLUMNS);
        push_filter(&mut builder, PostFilter::Author(author_id));
        builder.push(NEWEST_FIRST);

        builder
            .build_query_as::<Post>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("db error while fetching posts of {}: {}", author_id, e);
                DomainError::from(e)
            })
    }
}
