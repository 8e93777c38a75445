use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::presentation::dto::PostRequest;

/// Persisted record. `id` and `timestamp` stay `None` until the store
/// assigns them on first save and are never rewritten afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Option<i32>,
    pub title: String,
    pub content: String,
    pub timestamp: Option<NaiveDateTime>,
}

impl Post {
    pub fn new(title: String, content: String) -> Self {
        Self {
            id: None,
            title,
            content,
            timestamp: None,
        }
    }

    /// Overwrites the mutable fields from an incoming request.
    /// Identity and creation timestamp are untouched.
    pub fn update_with(&mut self, request: &PostRequest) {
        self.title = request.title.clone();
        self.content = request.content.clone();
    }
}

/// Identity equality: two posts are the same record iff both carry an
/// assigned id and the ids match. An unsaved post is not comparable by
/// identity, so it equals nothing, including a clone of itself. The
/// relation is not reflexive for unsaved values, hence no `Eq` impl.
impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
