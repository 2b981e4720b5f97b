//! Data Transfer Objects - response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public view of a post's author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: i32,
    pub email: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_verified: bool,
}

/// A post as rendered by every `/post` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    pub likes: i32,
    pub dislikes: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorResponse>,
}
