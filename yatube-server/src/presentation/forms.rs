use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::post::{Post, PostDraft};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Submitted post fields. Validation failures are returned to the caller
/// as field errors, never as an HTTP error.
///
/// `group` stays a string until `clean`, so a malformed id is reported as a
/// group error instead of discarding the whole submission.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PostForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl PostForm {
    fn group_field(&self) -> Option<&str> {
        self.group
            .as_deref()
            .map(str::trim)
            .filter(|group| !group.is_empty())
    }

    /// The selected group id, if one was given and it is well formed.
    pub fn group_id(&self) -> Option<Uuid> {
        self.group_field().and_then(|group| Uuid::parse_str(group).ok())
    }

    /// `group_known` tells whether the group returned by `group_id`, if
    /// any, exists.
    pub fn clean(&self, group_known: bool) -> Result<PostDraft, Vec<FieldError>> {
        let mut errors = Vec::new();
        let text = self.text.trim();
        if text.is_empty() {
            errors.push(FieldError::new("text", "This field is required."));
        }
        let group_id = self.group_id();
        let group_valid = match self.group_field() {
            Some(_) => group_id.is_some() && group_known,
            None => true,
        };
        if !group_valid {
            errors.push(FieldError::new(
                "group",
                "Select a valid choice. That choice is not one of the available choices.",
            ));
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PostDraft {
            text: text.to_string(),
            group_id,
            image: self
                .image
                .as_deref()
                .map(str::trim)
                .filter(|image| !image.is_empty())
                .map(str::to_owned),
        })
    }
}

impl From<&Post> for PostForm {
    fn from(post: &Post) -> Self {
        Self {
            text: post.text.clone(),
            group: post.group_id.map(|id| id.to_string()),
            image: post.image.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub text: String,
}
