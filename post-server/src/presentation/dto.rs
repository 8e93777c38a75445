use serde::Deserialize;

use crate::domain::post::Post;

/// Transport-only payload for create/update. Both keys are required and
/// non-null; deserialization rejects anything else before a handler runs.
#[derive(Debug, Clone, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub content: String,
}

impl PostRequest {
    /// Builds an unsaved entity; the store assigns id and timestamp.
    pub fn into_post(self) -> Post {
        Post::new(self.title, self.content)
    }
}
