use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
    pub text: String,
    pub image: Option<String>,
    pub pub_date: DateTime<Utc>,
}

/// Validated, author-independent content of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub text: String,
    pub group_id: Option<Uuid>,
    pub image: Option<String>,
}

impl Post {
    pub fn new(author_id: Uuid, draft: PostDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            group_id: draft.group_id,
            text: draft.text,
            image: draft.image,
            pub_date: Utc::now(),
        }
    }

    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    /// Replaces the editable content. Author and `pub_date` never change.
    pub fn apply(&mut self, draft: PostDraft) {
        self.text = draft.text;
        self.group_id = draft.group_id;
        self.image = draft.image;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    All,
    Group(Uuid),
    Author(Uuid),
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            PostFilter::All => true,
            PostFilter::Group(id) => post.group_id == Some(*id),
            PostFilter::Author(id) => post.author_id == *id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(text: &str) -> PostDraft {
        PostDraft {
            text: text.to_string(),
            group_id: None,
            image: None,
        }
    }

    #[test]
    fn apply_keeps_author_and_pub_date() {
        let author = Uuid::new_v4();
        let mut post = Post::new(author, draft("first"));
        let pub_date = post.pub_date;
        let group = Uuid::new_v4();

        post.apply(PostDraft {
            text: "second".into(),
            group_id: Some(group),
            image: Some("posts/cat.gif".into()),
        });

        assert_eq!(post.text, "second");
        assert_eq!(post.group_id, Some(group));
        assert_eq!(post.author_id, author);
        assert_eq!(post.pub_date, pub_date);
    }

    #[test]
    fn filter_matches_by_group_and_author() {
        let author = Uuid::new_v4();
        let group = Uuid::new_v4();
        let mut post = Post::new(author, draft("text"));
        post.group_id = Some(group);

        assert!(PostFilter::All.matches(&post));
        assert!(PostFilter::Group(group).matches(&post));
        assert!(PostFilter::Author(author).matches(&post));
        assert!(!PostFilter::Group(Uuid::new_v4()).matches(&post));
        assert!(!PostFilter::Author(Uuid::new_v4()).matches(&post));
    }
}
