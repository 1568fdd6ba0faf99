use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Directed edge from a follower (`user_id`) to a followed author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Follow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub author_id: Uuid,
    pub created: DateTime<Utc>,
}

impl Follow {
    /// Returns `None` for a self-follow, which is never a valid edge.
    pub fn new(user_id: Uuid, author_id: Uuid) -> Option<Self> {
        if user_id == author_id {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            user_id,
            author_id,
            created: Utc::now(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    Created,
    AlreadyFollowing,
    SelfFollow,
}
