use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::data::follow_repository::FollowRepository;
use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::follow::{Follow, FollowOutcome};
use crate::domain::pagination::{Page, PageNumber, Paginator};
use crate::domain::post::Post;

/// Follow mutations and the follow feed.
pub struct FollowService<F, P>
where
    F: FollowRepository + ?Sized + 'static,
    P: PostRepository + ?Sized + 'static,
{
    follows: Arc<F>,
    posts: Arc<P>,
    paginator: Paginator,
}

impl<F, P> FollowService<F, P>
where
    F: FollowRepository + ?Sized + 'static,
    P: PostRepository + ?Sized + 'static,
{
    pub fn new(follows: Arc<F>, posts: Arc<P>, paginator: Paginator) -> Self {
        Self {
            follows,
            posts,
            paginator,
        }
    }

    /// Posts of every author `viewer` follows, newest first, one page at a
    /// time. Equal timestamps keep their retrieval order.
    pub async fn feed(&self, viewer: Uuid, page: PageNumber) -> Result<Page<Post>, DomainError> {
        let follows = self.follows.follows_of(viewer).await?;
        if follows.is_empty() {
            return Ok(self.paginator.paginate(Vec::new(), page));
        }

        let mut authors = HashSet::new();
        let mut seen = HashSet::new();
        let mut posts = Vec::new();
        for follow in &follows {
            if !authors.insert(follow.author_id) {
                continue;
            }
            for post in self.posts.posts_by_author(follow.author_id).await? {
                if seen.insert(post.id) {
                    posts.push(post);
                }
            }
        }
        posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));

        debug!(viewer = %viewer, authors = authors.len(), posts = posts.len(), "feed assembled");
        Ok(self.paginator.paginate(posts, page))
    }

    /// Never fails on a self-follow or a repeated follow; both are no-ops.
    #[instrument(skip(self))]
    pub async fn follow(&self, user_id: Uuid, author_id: Uuid) -> Result<FollowOutcome, DomainError> {
        let Some(edge) = Follow::new(user_id, author_id) else {
            debug!("self-follow ignored");
            return Ok(FollowOutcome::SelfFollow);
        };
        if self.follows.exists(user_id, author_id).await? {
            return Ok(FollowOutcome::AlreadyFollowing);
        }

        // A concurrent duplicate is absorbed by the unique constraint.
        if self.follows.create(edge).await? {
            Ok(FollowOutcome::Created)
        } else {
            Ok(FollowOutcome::AlreadyFollowing)
        }
    }

    /// Returns whether an edge existed.
    #[instrument(skip(self))]
    pub async fn unfollow(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, DomainError> {
        self.follows.delete(user_id, author_id).await
    }

    pub async fn is_following(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, DomainError> {
        self.follows.exists(user_id, author_id).await
    }

    pub async fn follower_count(&self, author_id: Uuid) -> Result<usize, DomainError> {
        self.follows.count_followers(author_id).await
    }

    pub async fn following_authors(&self, user_id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        let follows = self.follows.follows_of(user_id).await?;
        Ok(follows.into_iter().map(|f| f.author_id).collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::data::memory::InMemoryStore;
    use crate::domain::post::PostDraft;
    use crate::domain::user::User;

    fn service(store: &InMemoryStore, page_size: usize) -> FollowService<InMemoryStore, InMemoryStore> {
        let store = Arc::new(store.clone());
        FollowService::new(Arc::clone(&store), store, Paginator::new(page_size))
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 4, 6, hour, minute, 0).unwrap()
    }

    async fn publish(store: &InMemoryStore, author: &User, text: &str, pub_date: DateTime<Utc>) -> Post {
        let mut post = Post::new(
            author.id,
            PostDraft {
                text: text.to_string(),
                group_id: None,
                image: None,
            },
        );
        post.pub_date = pub_date;
        PostRepository::create(store, post).await.unwrap()
    }

    #[tokio::test]
    async fn feed_without_follows_is_empty() {
        let store = InMemoryStore::new();
        let follows = service(&store, 10);
        let alice = store.add_user("alice").await;
        let bob = store.add_user("bob").await;
        publish(&store, &bob, "unseen", at(10, 0)).await;

        for page in [PageNumber::FIRST, PageNumber::from(7)] {
            let feed = follows.feed(alice.id, page).await.unwrap();
            assert!(feed.is_empty());
            assert_eq!(feed.number, 1);
        }
    }

    #[tokio::test]
    async fn feed_merges_followed_authors_newest_first() {
        let store = InMemoryStore::new();
        let follows = service(&store, 10);
        let alice = store.add_user("alice").await;
        let bob = store.add_user("bob").await;
        let carol = store.add_user("carol").await;
        let dave = store.add_user("dave").await;
        publish(&store, &bob, "bob 10:00", at(10, 0)).await;
        publish(&store, &bob, "bob 10:05", at(10, 5)).await;
        publish(&store, &carol, "carol 10:02", at(10, 2)).await;
        publish(&store, &dave, "dave 10:03", at(10, 3)).await;

        follows.follow(alice.id, bob.id).await.unwrap();
        follows.follow(alice.id, carol.id).await.unwrap();

        let feed = follows.feed(alice.id, PageNumber::FIRST).await.unwrap();
        let texts: Vec<_> = feed.items.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["bob 10:05", "carol 10:02", "bob 10:00"]);
    }

    #[tokio::test]
    async fn feed_has_no_duplicates_and_is_paginated() {
        let store = InMemoryStore::new();
        let follows = service(&store, 2);
        let alice = store.add_user("alice").await;
        let bob = store.add_user("bob").await;
        for minute in 0..5 {
            publish(&store, &bob, &format!("bob {minute}"), at(9, minute)).await;
        }
        follows.follow(alice.id, bob.id).await.unwrap();

        let first = follows.feed(alice.id, PageNumber::FIRST).await.unwrap();
        let last = follows.feed(alice.id, PageNumber::from(1000)).await.unwrap();

        assert_eq!(first.count, 5);
        assert_eq!(first.num_pages, 3);
        assert_eq!(first.len(), 2);
        assert_eq!(last.number, 3);
        assert_eq!(last.items[0].text, "bob 0");

        let mut ids = HashSet::new();
        for number in 1..=3 {
            for post in follows.feed(alice.id, PageNumber::from(number)).await.unwrap().items {
                assert!(ids.insert(post.id), "post listed twice");
            }
        }
        assert_eq!(ids.len(), 5);
    }

    #[tokio::test]
    async fn feed_is_deterministic() {
        let store = InMemoryStore::new();
        let follows = service(&store, 10);
        let alice = store.add_user("alice").await;
        let bob = store.add_user("bob").await;
        let carol = store.add_user("carol").await;
        publish(&store, &bob, "bob", at(10, 0)).await;
        publish(&store, &carol, "carol", at(10, 0)).await;
        follows.follow(alice.id, bob.id).await.unwrap();
        follows.follow(alice.id, carol.id).await.unwrap();

        let a = follows.feed(alice.id, PageNumber::FIRST).await.unwrap();
        let b = follows.feed(alice.id, PageNumber::FIRST).await.unwrap();

        assert_eq!(a, b);
        assert_eq!(a.items[0].text, "bob");
    }

    #[tokio::test]
    async fn self_follow_never_creates_an_edge() {
        let store = InMemoryStore::new();
        let follows = service(&store, 10);
        let alice = store.add_user("alice").await;

        let outcome = follows.follow(alice.id, alice.id).await.unwrap();

        assert_eq!(outcome, FollowOutcome::SelfFollow);
        assert_eq!(store.follow_count().await, 0);
    }

    #[tokio::test]
    async fn repeated_follow_creates_one_edge() {
        let store = InMemoryStore::new();
        let follows = service(&store, 10);
        let alice = store.add_user("alice").await;
        let bob = store.add_user("bob").await;

        assert_eq!(follows.follow(alice.id, bob.id).await.unwrap(), FollowOutcome::Created);
        assert_eq!(
            follows.follow(alice.id, bob.id).await.unwrap(),
            FollowOutcome::AlreadyFollowing
        );

        assert_eq!(store.follow_count().await, 1);
        assert!(follows.is_following(alice.id, bob.id).await.unwrap());
        assert!(!follows.is_following(bob.id, alice.id).await.unwrap());
        assert_eq!(follows.follower_count(bob.id).await.unwrap(), 1);
        assert_eq!(follows.following_authors(alice.id).await.unwrap(), vec![bob.id]);
    }

    #[tokio::test]
    async fn unfollow_removes_edge_and_is_idempotent() {
        let store = InMemoryStore::new();
        let follows = service(&store, 10);
        let alice = store.add_user("alice").await;
        let bob = store.add_user("bob").await;
        publish(&store, &bob, "bob", at(10, 0)).await;
        follows.follow(alice.id, bob.id).await.unwrap();

        assert!(follows.unfollow(alice.id, bob.id).await.unwrap());
        assert!(!follows.unfollow(alice.id, bob.id).await.unwrap());

        assert!(follows.feed(alice.id, PageNumber::FIRST).await.unwrap().is_empty());
    }
}
