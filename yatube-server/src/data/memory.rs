//! In-memory implementation of every repository, used by service tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::data::comment_repository::CommentRepository;
use crate::data::follow_repository::FollowRepository;
use crate::data::group_repository::GroupRepository;
use crate::data::post_repository::PostRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::follow::Follow;
use crate::domain::group::Group;
use crate::domain::post::{Post, PostDraft, PostFilter};
use crate::domain::user::User;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    groups: Vec<Group>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    follows: Vec<Follow>,
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, username: &str) -> User {
        let user = User::new(
            username.to_string(),
            format!("{username}@example.com"),
            "not-a-hash".to_string(),
        );
        self.tables.write().await.users.push(user.clone());
        user
    }

    pub async fn follow_count(&self) -> usize {
        self.tables.read().await.follows.len()
    }
}

/// Newest first; among equal timestamps the later insert wins.
fn newest_first(posts: impl DoubleEndedIterator<Item = Post>) -> Vec<Post> {
    let mut posts: Vec<Post> = posts.rev().collect();
    posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
    posts
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::UserAlreadyExists(
                "email already registered".to_string(),
            ));
        }
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(DomainError::UserAlreadyExists(
                "username already taken".to_string(),
            ));
        }
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl GroupRepository for InMemoryStore {
    async fn create(&self, group: Group) -> Result<Group, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.groups.iter().any(|g| g.slug == group.slug) {
            return Err(DomainError::GroupAlreadyExists(group.slug));
        }
        tables.groups.push(group.clone());
        Ok(group)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.groups.iter().find(|g| g.slug == slug).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.groups.iter().find(|g| g.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Group>, DomainError> {
        let mut groups = self.tables.read().await.groups.clone();
        groups.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(groups)
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn create(&self, post: Post) -> Result<Post, DomainError> {
        self.tables.write().await.posts.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn update_post(
        &self,
        id: Uuid,
        author_id: Uuid,
        draft: &PostDraft,
    ) -> Result<Option<Post>, DomainError> {
        let mut tables = self.tables.write().await;
        let Some(post) = tables
            .posts
            .iter_mut()
            .find(|p| p.id == id && p.author_id == author_id)
        else {
            return Ok(None);
        };
        post.apply(draft.clone());
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: Uuid, author_id: Uuid) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables.posts.iter().position(|p| p.id == id) else {
            return Err(DomainError::PostNotFound(id));
        };
        if tables.posts[index].author_id != author_id {
            return Err(DomainError::Forbidden);
        }
        tables.posts.remove(index);
        tables.comments.retain(|c| c.post_id != id);
        Ok(())
    }

    async fn count(&self, filter: PostFilter) -> Result<usize, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.iter().filter(|p| filter.matches(p)).count())
    }

    async fn list(
        &self,
        filter: PostFilter,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Post>, DomainError> {
        let tables = self.tables.read().await;
        let posts = newest_first(tables.posts.iter().filter(|p| filter.matches(p)).cloned());
        Ok(posts.into_iter().skip(offset).take(limit).collect())
    }

    async fn posts_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, DomainError> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            tables
                .posts
                .iter()
                .filter(|p| p.author_id == author_id)
                .cloned(),
        ))
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn create(&self, comment: Comment) -> Result<Comment, DomainError> {
        self.tables.write().await.comments.push(comment.clone());
        Ok(comment)
    }

    async fn for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .rev()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(comments)
    }
}

#[async_trait]
impl FollowRepository for InMemoryStore {
    async fn create(&self, follow: Follow) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        if tables
            .follows
            .iter()
            .any(|f| f.user_id == follow.user_id && f.author_id == follow.author_id)
        {
            return Ok(false);
        }
        tables.follows.push(follow);
        Ok(true)
    }

    async fn delete(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        let before = tables.follows.len();
        tables
            .follows
            .retain(|f| !(f.user_id == user_id && f.author_id == author_id));
        Ok(tables.follows.len() < before)
    }

    async fn exists(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .follows
            .iter()
            .any(|f| f.user_id == user_id && f.author_id == author_id))
    }

    async fn follows_of(&self, user_id: Uuid) -> Result<Vec<Follow>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .follows
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn count_followers(&self, author_id: Uuid) -> Result<usize, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .follows
            .iter()
            .filter(|f| f.author_id == author_id)
            .count())
    }
}
