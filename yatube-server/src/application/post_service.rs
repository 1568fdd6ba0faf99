use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::pagination::{Page, PageNumber, Paginator};
use crate::domain::post::{Post, PostDraft, PostFilter};
use crate::infrastructure::cache::PageCache;

#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Updated(Post),
    /// The editor does not own the post; nothing was changed.
    NotAuthor(Post),
}

pub struct PostService<R: PostRepository + ?Sized + 'static> {
    repo: Arc<R>,
    paginator: Paginator,
    /// Keyed by the resolved page number, so out-of-range requests share
    /// the entry of the last page.
    index_cache: PageCache<usize, Page<Post>>,
}

impl<R> PostService<R>
where
    R: PostRepository + ?Sized + 'static,
{
    pub fn new(repo: Arc<R>, paginator: Paginator, index_cache_ttl: Duration) -> Self {
        Self {
            repo,
            paginator,
            index_cache: PageCache::new(index_cache_ttl),
        }
    }

    /// All posts, newest first. Pages are cached per resolved number.
    pub async fn index(&self, page: PageNumber) -> Result<Page<Post>, DomainError> {
        let count = self.repo.count(PostFilter::All).await?;
        let window = self.paginator.window(count, page);
        if let Some(cached) = self.index_cache.get(&window.number).await {
            debug!(page = window.number, "index page served from cache");
            return Ok(cached);
        }

        let posts = self.repo.list(PostFilter::All, window.limit, window.offset).await?;
        let listing = Page::new(posts, window);
        self.index_cache.insert(window.number, listing.clone()).await;
        Ok(listing)
    }

    pub async fn group_posts(
        &self,
        group_id: Uuid,
        page: PageNumber,
    ) -> Result<Page<Post>, DomainError> {
        self.listing(PostFilter::Group(group_id), page).await
    }

    pub async fn author_posts(
        &self,
        author_id: Uuid,
        page: PageNumber,
    ) -> Result<Page<Post>, DomainError> {
        self.listing(PostFilter::Author(author_id), page).await
    }

    pub async fn count_by_author(&self, author_id: Uuid) -> Result<usize, DomainError> {
        self.repo.count(PostFilter::Author(author_id)).await
    }

    pub async fn get_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PostNotFound(id))
    }

    #[instrument(skip(self, draft))]
    pub async fn create_post(&self, author_id: Uuid, draft: PostDraft) -> Result<Post, DomainError> {
        let post = Post::new(author_id, draft);
        self.repo.create(post).await
    }

    #[instrument(skip(self, draft))]
    pub async fn edit_post(
        &self,
        editor_id: Uuid,
        post_id: Uuid,
        draft: PostDraft,
    ) -> Result<EditOutcome, DomainError> {
        let post = self.get_post(post_id).await?;
        if !post.is_authored_by(editor_id) {
            info!(post_id = %post_id, editor_id = %editor_id, "edit by non-author ignored");
            return Ok(EditOutcome::NotAuthor(post));
        }

        match self.repo.update_post(post_id, editor_id, &draft).await? {
            Some(updated) => Ok(EditOutcome::Updated(updated)),
            None => Err(DomainError::PostNotFound(post_id)),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_post(&self, user_id: Uuid, post_id: Uuid) -> Result<(), DomainError> {
        self.repo.delete_post(post_id, user_id).await
    }

    async fn listing(&self, filter: PostFilter, page: PageNumber) -> Result<Page<Post>, DomainError> {
        let count = self.repo.count(filter).await?;
        let window = self.paginator.window(count, page);
        let posts = self.repo.list(filter, window.limit, window.offset).await?;
        Ok(Page::new(posts, window))
    }
}
