use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::data::group_repository::GroupRepository;
use crate::domain::error::DomainError;
use crate::domain::group::{Group, MAX_SLUG_LEN, is_valid_slug};

pub struct GroupService<R: GroupRepository + ?Sized + 'static> {
    repo: Arc<R>,
}

impl<R> GroupService<R>
where
    R: GroupRepository + ?Sized + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Group, DomainError> {
        self.repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::GroupNotFound(slug.to_string()))
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.repo.find_by_id(id).await?.is_some())
    }

    pub async fn list(&self) -> Result<Vec<Group>, DomainError> {
        self.repo.list().await
    }

    #[instrument(skip(self, description))]
    pub async fn create_group(
        &self,
        title: String,
        slug: String,
        description: String,
    ) -> Result<Group, DomainError> {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::InvalidInput("group title is required".into()));
        }
        if !is_valid_slug(&slug) {
            return Err(DomainError::InvalidInput(format!(
                "slug must be 1-{MAX_SLUG_LEN} latin letters, digits, '-' or '_'"
            )));
        }
        self.repo.create(Group::new(title, slug, description)).await
    }
}
