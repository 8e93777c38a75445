use std::sync::Arc;

use crate::data::post_repository::PostRepository;
use crate::domain::{error::DomainError, post::Post};
use crate::presentation::dto::PostRequest;
use tracing::instrument;

/// Pass-through orchestration over the entity store. The only rule it
/// owns is translating an absent id into `EntityNotFound`.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, id: i32) -> Result<Post, DomainError> {
        self.find(id).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, request: PostRequest) -> Result<Post, DomainError> {
        self.repo.save(request.into_post()).await
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: i32, request: PostRequest) -> Result<Post, DomainError> {
        let mut post = self.find(id).await?;
        post.update_with(&request);
        self.repo.save(post).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let post = self.find(id).await?;
        self.repo.delete(&post).await
    }

    async fn find(&self, id: i32) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::EntityNotFound(id))
    }
}
