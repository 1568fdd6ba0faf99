use std::sync::Arc;

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::data::comment_repository::CommentRepository;
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;

pub struct CommentService<R: CommentRepository + ?Sized + 'static> {
    repo: Arc<R>,
}

impl<R> CommentService<R>
where
    R: CommentRepository + ?Sized + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Blank text is dropped without error; `None` means nothing was stored.
    #[instrument(skip(self, text))]
    pub async fn add_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        text: &str,
    ) -> Result<Option<Comment>, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            debug!("blank comment ignored");
            return Ok(None);
        }
        let comment = Comment::new(post_id, author_id, text.to_string());
        self.repo.create(comment).await.map(Some)
    }

    pub async fn comments_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        self.repo.for_post(post_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::InMemoryStore;

    #[tokio::test]
    async fn new_comment_is_listed_before_older_ones() {
        let store = InMemoryStore::new();
        let comments = CommentService::new(Arc::new(store.clone()));
        let author = store.add_user("auth").await;
        let post_id = Uuid::new_v4();

        comments.add_comment(post_id, author.id, "first").await.unwrap();
        let latest = comments
            .add_comment(post_id, author.id, "Test comment")
            .await
            .unwrap()
            .unwrap();

        let listed = comments.comments_for_post(post_id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0], latest);
        assert_eq!(listed[1].text, "first");
    }

    #[tokio::test]
    async fn blank_comment_is_ignored() {
        let store = InMemoryStore::new();
        let comments = CommentService::new(Arc::new(store.clone()));
        let post_id = Uuid::new_v4();

        let stored = comments
            .add_comment(post_id, Uuid::new_v4(), "   ")
            .await
            .unwrap();

        assert!(stored.is_none());
        assert!(comments.comments_for_post(post_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn comments_are_scoped_to_their_post() {
        let store = InMemoryStore::new();
        let comments = CommentService::new(Arc::new(store.clone()));
        let author = Uuid::new_v4();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        comments.add_comment(a, author, "on a").await.unwrap();
        comments.add_comment(b, author, "on b").await.unwrap();

        let on_a = comments.comments_for_post(a).await.unwrap();
        assert_eq!(on_a.len(), 1);
        assert_eq!(on_a[0].text, "on a");
    }
}
