//! In-memory entity store - backs the test suite and local runs without
//! a database. Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::Post;

struct Inner {
    posts: HashMap<i32, Post>,
    next_id: i32,
}

pub struct InMemoryPostRepository {
    inner: RwLock<Inner>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                posts: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Seeds a post as if it had been stored earlier, keeping whatever id
    /// and timestamp it carries.
    pub async fn seed(&self, post: Post) {
        let mut inner = self.inner.write().await;
        let id = post.id.expect("seeded post must have an id");
        inner.next_id = inner.next_id.max(id + 1);
        inner.posts.insert(id, post);
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.posts.len()
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, DomainError> {
        Ok(self.inner.read().await.posts.get(&id).cloned())
    }

    async fn save(&self, mut post: Post) -> Result<Post, DomainError> {
        let mut inner = self.inner.write().await;
        let id = match post.id {
            Some(id) => id,
            None => {
                let id = inner.next_id;
                inner.next_id += 1;
                post.id = Some(id);
                id
            }
        };
        if post.timestamp.is_none() {
            post.timestamp = Some(Utc::now().naive_utc());
        }
        inner.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn delete(&self, post: &Post) -> Result<(), DomainError> {
        let id = post
            .id
            .ok_or_else(|| DomainError::Internal("cannot delete an unsaved post".into()))?;
        self.inner.write().await.posts.remove(&id);
        Ok(())
    }
}
